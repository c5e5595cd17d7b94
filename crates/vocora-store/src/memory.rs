use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use vocora_core::{DefinitionStore, PreferenceStore, StoreError, VocabStore};
use vocora_types::{Definition, Language};

/// Store kept in process memory, for offline sessions
#[derive(Default)]
pub struct MemoryStore {
    definitions: RwLock<HashMap<(String, Language), Definition>>,
    /// (owner, word, language) in insertion order
    vocab: RwLock<Vec<(String, String, Language)>>,
    preferences: RwLock<HashMap<String, Language>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an owner's words, used for the shared starter list
    pub async fn seed_vocab<I, S>(&self, owner: &str, language: Language, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocab = self.vocab.write().await;
        vocab.extend(words.into_iter().map(|w| (owner.to_string(), w.into(), language)));
    }

    pub async fn definition_count(&self) -> usize {
        self.definitions.read().await.len()
    }
}

#[async_trait]
impl DefinitionStore for MemoryStore {
    async fn get(&self, word: &str, language: Language) -> Result<Option<Definition>, StoreError> {
        let definitions = self.definitions.read().await;
        Ok(definitions.get(&(word.to_string(), language)).cloned())
    }

    async fn upsert(&self, definition: &Definition) -> Result<(), StoreError> {
        self.definitions.write().await.insert(
            (definition.word.clone(), definition.language),
            definition.clone(),
        );
        Ok(())
    }
}

#[async_trait]
impl VocabStore for MemoryStore {
    async fn list(&self, owners: &[String], language: Language) -> Result<Vec<String>, StoreError> {
        let vocab = self.vocab.read().await;
        let mut words: Vec<String> = Vec::new();

        for owner in owners {
            for (o, word, lang) in vocab.iter() {
                if o == owner && *lang == language && !words.contains(word) {
                    words.push(word.clone());
                }
            }
        }

        Ok(words)
    }

    async fn add(&self, owner: &str, word: &str, language: Language) -> Result<(), StoreError> {
        self.vocab
            .write()
            .await
            .push((owner.to_string(), word.to_string(), language));
        Ok(())
    }

    async fn remove(&self, owner: &str, word: &str, language: Language) -> Result<(), StoreError> {
        self.vocab
            .write()
            .await
            .retain(|(o, w, l)| !(o == owner && w == word && *l == language));
        Ok(())
    }

    async fn clear(&self, owner: &str, language: Language) -> Result<(), StoreError> {
        self.vocab
            .write()
            .await
            .retain(|(o, _, l)| !(o == owner && *l == language));
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for MemoryStore {
    async fn practice_language(&self, owner: &str) -> Result<Option<Language>, StoreError> {
        Ok(self.preferences.read().await.get(owner).copied())
    }

    async fn set_practice_language(&self, owner: &str, language: Language) -> Result<(), StoreError> {
        self.preferences.write().await.insert(owner.to_string(), language);
        Ok(())
    }
}
