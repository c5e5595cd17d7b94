//! In-process doubles for the store and generator traits, shared by the
//! unit tests of this crate.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use vocora_generator::{DefinitionGenerator, GenerateError, GeneratedDefinition, ProviderMetadata};
use vocora_types::{Definition, Language};

use crate::dictionary::{DefinitionStore, PreferenceStore, StoreError, VocabStore};

#[derive(Default)]
pub struct FakeStore {
    pub definitions: Mutex<HashMap<(String, Language), Definition>>,
    pub vocab: Mutex<Vec<(String, String, Language)>>,
    pub prefs: Mutex<HashMap<String, Language>>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub write_delay: Option<Duration>,
    pub reads: AtomicUsize,
}

impl FakeStore {
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    pub fn slow_writes(delay: Duration) -> Self {
        Self {
            write_delay: Some(delay),
            ..Self::default()
        }
    }

    fn write_guard(&self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Api {
                status: 500,
                message: "write rejected".to_string(),
            });
        }
        Ok(())
    }

    pub fn stored(&self, word: &str, language: Language) -> Option<Definition> {
        self.definitions
            .lock()
            .unwrap()
            .get(&(word.to_string(), language))
            .cloned()
    }
}

#[async_trait]
impl DefinitionStore for FakeStore {
    async fn get(&self, word: &str, language: Language) -> Result<Option<Definition>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(StoreError::Network("connection reset".to_string()));
        }
        Ok(self.stored(word, language))
    }

    async fn upsert(&self, definition: &Definition) -> Result<(), StoreError> {
        if let Some(delay) = self.write_delay {
            tokio::time::sleep(delay).await;
        }
        self.write_guard()?;
        self.definitions.lock().unwrap().insert(
            (definition.word.clone(), definition.language),
            definition.clone(),
        );
        Ok(())
    }
}

#[async_trait]
impl VocabStore for FakeStore {
    async fn list(&self, owners: &[String], language: Language) -> Result<Vec<String>, StoreError> {
        let rows = self.vocab.lock().unwrap();
        let mut words: Vec<String> = Vec::new();
        for (owner, word, lang) in rows.iter() {
            if *lang == language && owners.contains(owner) && !words.contains(word) {
                words.push(word.clone());
            }
        }
        Ok(words)
    }

    async fn add(&self, owner: &str, word: &str, language: Language) -> Result<(), StoreError> {
        self.write_guard()?;
        self.vocab
            .lock()
            .unwrap()
            .push((owner.to_string(), word.to_string(), language));
        Ok(())
    }

    async fn remove(&self, owner: &str, word: &str, language: Language) -> Result<(), StoreError> {
        self.write_guard()?;
        self.vocab
            .lock()
            .unwrap()
            .retain(|(o, w, l)| !(o == owner && w == word && *l == language));
        Ok(())
    }

    async fn clear(&self, owner: &str, language: Language) -> Result<(), StoreError> {
        self.write_guard()?;
        self.vocab
            .lock()
            .unwrap()
            .retain(|(o, _, l)| !(o == owner && *l == language));
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for FakeStore {
    async fn practice_language(&self, owner: &str) -> Result<Option<Language>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Network("connection reset".to_string()));
        }
        Ok(self.prefs.lock().unwrap().get(owner).copied())
    }

    async fn set_practice_language(&self, owner: &str, language: Language) -> Result<(), StoreError> {
        self.write_guard()?;
        self.prefs.lock().unwrap().insert(owner.to_string(), language);
        Ok(())
    }
}

/// How the scripted generator answers
pub enum Script {
    Answer,
    Malformed,
    Unavailable,
    /// Fail with a 503 on the first call only
    FlakyOnce,
}

pub struct ScriptedGenerator {
    pub script: Script,
    pub calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DefinitionGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        word: &str,
        _story: &str,
        language: Language,
    ) -> Result<GeneratedDefinition, GenerateError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let answer = || GeneratedDefinition {
            translated_word: format!("{word}-{language}"),
            part_of_speech: "noun".to_string(),
            definition: format!("meaning of {word}"),
        };

        match self.script {
            Script::Answer => Ok(answer()),
            Script::Malformed => Err(GenerateError::MalformedResponse("not JSON".to_string())),
            Script::Unavailable => Err(GenerateError::Http { status: 503 }),
            Script::FlakyOnce if call == 0 => Err(GenerateError::Http { status: 503 }),
            Script::FlakyOnce => Ok(answer()),
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "scripted".to_string(),
            model: "none".to_string(),
            requires_api_key: false,
        }
    }
}

/// Answers only after the test hands out a permit
pub struct GatedGenerator {
    pub gate: tokio::sync::Semaphore,
    pub calls: AtomicUsize,
}

impl GatedGenerator {
    pub fn new() -> Self {
        Self {
            gate: tokio::sync::Semaphore::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn release(&self, answers: usize) {
        self.gate.add_permits(answers);
    }
}

#[async_trait]
impl DefinitionGenerator for GatedGenerator {
    async fn generate(
        &self,
        word: &str,
        _story: &str,
        _language: Language,
    ) -> Result<GeneratedDefinition, GenerateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| GenerateError::ApiError(e.to_string()))?;
        permit.forget();

        Ok(GeneratedDefinition {
            translated_word: word.to_uppercase(),
            part_of_speech: "noun".to_string(),
            definition: format!("meaning of {word}"),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "gated".to_string(),
            model: "none".to_string(),
            requires_api_key: false,
        }
    }
}
