use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use vocora_config::store::StoreConfig;
use vocora_core::{DefinitionStore, PreferenceStore, StoreError, VocabStore};
use vocora_types::{Definition, Language};

use crate::rows::{DefinitionRow, PreferenceRow, VocabRow, dedupe_words, eq, in_list};

/// Tables of a hosted backend reached through its REST interface
#[derive(Clone)]
pub struct RestStore {
    rest_url: String,
    api_key: String,
    definitions_table: String,
    vocab_table: String,
    preferences_table: String,
    client: reqwest::Client,
}

impl RestStore {
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        if !config.is_configured() {
            return Err(StoreError::NotConfigured);
        }

        Ok(Self {
            rest_url: config.rest_url(),
            api_key: config.api_key.clone(),
            definitions_table: config.definitions_table.clone(),
            vocab_table: config.vocab_table.clone(),
            preferences_table: config.preferences_table.clone(),
            client: reqwest::Client::new(),
        })
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{table}", self.rest_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Send and turn non-2xx answers into [`StoreError::Api`]
    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn select<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Vec<T>, StoreError> {
        self.send(request)
            .await?
            .json::<Vec<T>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// Insert `row`, merging into the row that shares `conflict` columns
    async fn upsert_row<T: Serialize>(&self, table: &str, conflict: &str, row: &T) -> Result<(), StoreError> {
        let request = self
            .request(Method::POST, table)
            .query(&[("on_conflict", conflict)])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(row);

        self.send(request).await.map(drop)
    }
}

#[async_trait]
impl DefinitionStore for RestStore {
    async fn get(&self, word: &str, language: Language) -> Result<Option<Definition>, StoreError> {
        let request = self.request(Method::GET, &self.definitions_table).query(&[
            ("select", "word,lang,translated_word,part_of_speech,definition,story_hash".to_string()),
            ("word", eq(word)),
            ("lang", eq(language.code())),
            ("limit", "1".to_string()),
        ]);

        let rows: Vec<DefinitionRow> = self.select(request).await?;
        rows.into_iter().next().map(Definition::try_from).transpose()
    }

    async fn upsert(&self, definition: &Definition) -> Result<(), StoreError> {
        let row = DefinitionRow::from(definition);
        self.upsert_row(&self.definitions_table, "word,lang", &row).await?;
        tracing::debug!(word = %definition.word, lang = %definition.language, "definition stored");
        Ok(())
    }
}

#[async_trait]
impl VocabStore for RestStore {
    async fn list(&self, owners: &[String], language: Language) -> Result<Vec<String>, StoreError> {
        if owners.is_empty() {
            return Ok(Vec::new());
        }

        let request = self.request(Method::GET, &self.vocab_table).query(&[
            ("select", "word,language,uid".to_string()),
            ("uid", in_list(owners)),
            ("language", eq(language.code())),
        ]);

        let mut rows: Vec<VocabRow> = self.select(request).await?;
        // owners listed first win
        rows.sort_by_key(|row| owners.iter().position(|o| *o == row.uid));
        Ok(dedupe_words(rows))
    }

    async fn add(&self, owner: &str, word: &str, language: Language) -> Result<(), StoreError> {
        let row = VocabRow {
            word: word.to_string(),
            language: language.code().to_string(),
            uid: owner.to_string(),
        };
        let request = self.request(Method::POST, &self.vocab_table).json(&row);
        self.send(request).await.map(drop)
    }

    async fn remove(&self, owner: &str, word: &str, language: Language) -> Result<(), StoreError> {
        let request = self.request(Method::DELETE, &self.vocab_table).query(&[
            ("uid", eq(owner)),
            ("word", eq(word)),
            ("language", eq(language.code())),
        ]);
        self.send(request).await.map(drop)
    }

    async fn clear(&self, owner: &str, language: Language) -> Result<(), StoreError> {
        let request = self
            .request(Method::DELETE, &self.vocab_table)
            .query(&[("uid", eq(owner)), ("language", eq(language.code()))]);
        self.send(request).await.map(drop)
    }
}

#[async_trait]
impl PreferenceStore for RestStore {
    async fn practice_language(&self, owner: &str) -> Result<Option<Language>, StoreError> {
        let request = self.request(Method::GET, &self.preferences_table).query(&[
            ("select", "uid,practice_lang".to_string()),
            ("uid", eq(owner)),
            ("limit", "1".to_string()),
        ]);

        let rows: Vec<PreferenceRow> = self.select(request).await?;
        Ok(rows.first().and_then(PreferenceRow::language))
    }

    async fn set_practice_language(&self, owner: &str, language: Language) -> Result<(), StoreError> {
        let row = PreferenceRow {
            uid: owner.to_string(),
            practice_lang: Some(language.code().to_string()),
        };
        self.upsert_row(&self.preferences_table, "uid", &row).await
    }
}
