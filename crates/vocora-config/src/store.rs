use serde::{Deserialize, Serialize};

use crate::Env;

fn default_definitions_table() -> String {
    "cached_definitions".to_string()
}

fn default_vocab_table() -> String {
    "vocab_words".to_string()
}

fn default_preferences_table() -> String {
    "user_preferences".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the hosted backend, `/rest/v1` is appended
    pub url: String,
    /// Anonymous or service key sent as `apikey` and bearer token
    pub api_key: String,
    #[serde(default = "default_definitions_table")]
    pub definitions_table: String,
    #[serde(default = "default_vocab_table")]
    pub vocab_table: String,
    #[serde(default = "default_preferences_table")]
    pub preferences_table: String,
    /// Owner of the starter vocabulary every user sees
    pub shared_user_id: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            definitions_table: default_definitions_table(),
            vocab_table: default_vocab_table(),
            preferences_table: default_preferences_table(),
            shared_user_id: None,
        }
    }
}

impl StoreConfig {
    pub fn from_env(env: &Env) -> Self {
        Self {
            url: env.string("VOCORA_STORE_URL").unwrap_or_default(),
            api_key: env.string("VOCORA_STORE_KEY").unwrap_or_default(),
            shared_user_id: env.string("VOCORA_SHARED_USER_ID"),
            ..Self::default()
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.api_key.is_empty()
    }

    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url.trim_end_matches('/'))
    }
}
