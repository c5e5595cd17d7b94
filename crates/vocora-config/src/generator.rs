use serde::{Deserialize, Serialize};

use crate::Env;

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_definition_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_story_model() -> String {
    "o1-mini-2024-09-12".to_string()
}

fn default_timeout_seconds() -> u64 {
    15
}

fn default_retries() -> u32 {
    1
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Chat completions endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    /// Model used for hover definitions
    #[serde(default = "default_definition_model")]
    pub definition_model: String,
    /// Model used for practice stories and their translations
    #[serde(default = "default_story_model")]
    pub story_model: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Extra attempts after a transient generation failure
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
            definition_model: default_definition_model(),
            story_model: default_story_model(),
            timeout_seconds: default_timeout_seconds(),
            retries: default_retries(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_env(env: &Env) -> Self {
        let defaults = Self::default();

        Self {
            api_url: env.string("OPENAI_API_URL").unwrap_or(defaults.api_url),
            api_key: env.string("OPENAI_API_KEY").unwrap_or_default(),
            definition_model: env
                .string("OPENAI_DEFINITION_MODEL")
                .unwrap_or(defaults.definition_model),
            story_model: env.string("OPENAI_STORY_MODEL").unwrap_or(defaults.story_model),
            timeout_seconds: env
                .parsed("GENERATION_TIMEOUT_SECONDS")
                .unwrap_or(defaults.timeout_seconds),
            retries: env.parsed("GENERATION_RETRIES").unwrap_or(defaults.retries),
        }
    }
}
