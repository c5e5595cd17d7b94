//! Write-through definition cache.
//!
//! A lookup reads the shared store first and only asks the generator on a
//! miss. Fresh definitions are written back in a background task; a later
//! lookup of the same key waits for that write before it reads, so the
//! second lookup never generates again. Failures of any kind come back as
//! a placeholder definition, never as an error.
//!
//! The store key is (word, language). The story hash kept on each row is
//! not consulted on read, so a word is defined once per language no
//! matter which story asked first.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use vocora_generator::{DefinitionGenerator, GeneratedDefinition};
use vocora_types::{Definition, Language};

use crate::dictionary::DefinitionStore;
use crate::error::LookupError;
use crate::language::NormalizedWord;
use crate::preprocess::story_hash;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    word: String,
    language: Language,
}

/// Outcome of a lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Cached(Definition),
    Generated(Definition),
    Unavailable {
        definition: Definition,
        error: LookupError,
    },
}

impl Resolution {
    pub fn definition(&self) -> &Definition {
        match self {
            Resolution::Cached(d) | Resolution::Generated(d) => d,
            Resolution::Unavailable { definition, .. } => definition,
        }
    }

    pub fn into_definition(self) -> Definition {
        match self {
            Resolution::Cached(d) | Resolution::Generated(d) => d,
            Resolution::Unavailable { definition, .. } => definition,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Resolution::Unavailable { .. })
    }
}

pub struct DefinitionCache {
    store: Arc<dyn DefinitionStore>,
    generator: Arc<dyn DefinitionGenerator>,
    retries: u32,
    writes: Mutex<HashMap<CacheKey, JoinHandle<()>>>,
}

impl DefinitionCache {
    pub fn new(store: Arc<dyn DefinitionStore>, generator: Arc<dyn DefinitionGenerator>) -> Self {
        Self {
            store,
            generator,
            retries: 1,
            writes: Mutex::new(HashMap::new()),
        }
    }

    /// Extra generation attempts after a transient failure
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Resolve `word` in `language`, generating from `story` on a miss
    pub async fn lookup(&self, word: &NormalizedWord, language: Language, story: &str) -> Resolution {
        let key = CacheKey {
            word: word.as_str().to_string(),
            language,
        };

        self.wait_for_write(&key).await;

        match self.store.get(word.as_str(), language).await {
            Ok(Some(definition)) => {
                tracing::debug!(%word, %language, "definition cache hit");
                return Resolution::Cached(definition);
            }
            Ok(None) => tracing::debug!(%word, %language, "definition cache miss"),
            Err(e) => tracing::warn!(%word, %language, "definition cache read failed: {e}"),
        }

        let generated = match self.generate(word, language, story).await {
            Ok(generated) => generated,
            Err(error) => {
                tracing::warn!(%word, %language, "{error}");
                return Resolution::Unavailable {
                    definition: Definition::unavailable(word.as_str(), language),
                    error,
                };
            }
        };

        let definition = Definition {
            word: key.word.clone(),
            language,
            translated_word: generated.translated_word,
            part_of_speech: generated.part_of_speech,
            definition_text: generated.definition,
            context_hash: story_hash(story),
        };

        self.write_back(key, definition.clone()).await;
        Resolution::Generated(definition)
    }

    async fn generate(
        &self,
        word: &NormalizedWord,
        language: Language,
        story: &str,
    ) -> Result<GeneratedDefinition, LookupError> {
        let mut attempt = 0;

        loop {
            match self.generator.generate(word.as_str(), story, language).await {
                Ok(generated) => return Ok(generated),
                Err(e) if e.is_transient() && attempt < self.retries => {
                    attempt += 1;
                    tracing::info!(%word, attempt, "retrying definition generation: {e}");
                }
                Err(e) => return Err(LookupError::from(&e)),
            }
        }
    }

    async fn write_back(&self, key: CacheKey, definition: Definition) {
        let store = Arc::clone(&self.store);

        let handle = tokio::spawn(async move {
            match store.upsert(&definition).await {
                Ok(()) => tracing::debug!(word = %definition.word, "definition cached"),
                Err(e) => {
                    let error = LookupError::StoreWriteFailure(e.to_string());
                    tracing::warn!(
                        word = %definition.word,
                        language = %definition.language,
                        "{error}"
                    );
                }
            }
        });

        let mut writes = self.writes.lock().await;
        writes.retain(|_, pending| !pending.is_finished());
        writes.insert(key, handle);
    }

    /// Wait for every pending write-back; call before the runtime shuts down
    pub async fn flush(&self) {
        let pending: Vec<(CacheKey, JoinHandle<()>)> = self.writes.lock().await.drain().collect();

        for (key, handle) in pending {
            if let Err(e) = handle.await {
                tracing::warn!(word = %key.word, "definition write task failed: {e}");
            }
        }
    }

    async fn wait_for_write(&self, key: &CacheKey) {
        let pending = self.writes.lock().await.remove(key);

        if let Some(handle) = pending
            && let Err(e) = handle.await
        {
            tracing::warn!(word = %key.word, "definition write task failed: {e}");
        }
    }
}
