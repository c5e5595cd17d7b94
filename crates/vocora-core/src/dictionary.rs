use async_trait::async_trait;
use vocora_types::{Definition, Language};

/// Shared table of generated definitions keyed by (word, language)
#[async_trait]
pub trait DefinitionStore: Send + Sync {
    /// Cached definition for the key, if any
    async fn get(&self, word: &str, language: Language) -> Result<Option<Definition>, StoreError>;

    /// Insert or replace the row for `definition`'s key
    async fn upsert(&self, definition: &Definition) -> Result<(), StoreError>;
}

/// Per-user vocabulary lists
#[async_trait]
pub trait VocabStore: Send + Sync {
    /// Words owned by any of `owners` in `language`, duplicates removed, first seen first
    async fn list(&self, owners: &[String], language: Language) -> Result<Vec<String>, StoreError>;

    async fn add(&self, owner: &str, word: &str, language: Language) -> Result<(), StoreError>;

    async fn remove(&self, owner: &str, word: &str, language: Language) -> Result<(), StoreError>;

    /// Delete every word the owner has in `language`
    async fn clear(&self, owner: &str, language: Language) -> Result<(), StoreError>;
}

/// Per-user settings
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn practice_language(&self, owner: &str) -> Result<Option<Language>, StoreError>;

    async fn set_practice_language(&self, owner: &str, language: Language) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Store returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid row: {0}")]
    Decode(String),

    #[error("Store is not configured")]
    NotConfigured,
}
