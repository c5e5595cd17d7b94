use vocora_types::{Language, StoryLength};

pub mod openai;
pub mod prompt;
pub mod schema;

pub use openai::OpenAiGenerator;
pub use schema::GeneratedDefinition;

/// Produces context-aware definitions for single words
#[async_trait::async_trait]
pub trait DefinitionGenerator: Send + Sync {
    /// Explain `word` as it is used in `story`, written in `language`
    async fn generate(
        &self,
        word: &str,
        story: &str,
        language: Language,
    ) -> Result<GeneratedDefinition, GenerateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

/// Produces practice stories around a vocabulary list
#[async_trait::async_trait]
pub trait StoryGenerator: Send + Sync {
    /// Write a story in `practice` using `words`, plus its translation into `user`
    async fn generate_story(
        &self,
        words: &[String],
        length: StoryLength,
        practice: Language,
        user: Language,
    ) -> Result<GeneratedStory, GenerateError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedStory {
    pub story: String,
    pub translation: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("HTTP {status} from generation service")]
    Http { status: u16 },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

impl GenerateError {
    /// Whether repeating the same request may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            GenerateError::NetworkError(e) => !e.is_builder() && !e.is_decode(),
            GenerateError::Http { status } => *status >= 500,
            GenerateError::RateLimitExceeded => true,
            GenerateError::ApiError(_)
            | GenerateError::MalformedResponse(_)
            | GenerateError::InvalidRequest(_)
            | GenerateError::AuthenticationError => false,
        }
    }
}
