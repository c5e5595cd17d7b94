use serde::{Deserialize, Serialize};
use vocora_types::Language;

use crate::Env;

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    /// Signed-in user; vocabulary writes need one
    pub user_id: Option<String>,
    /// Language definitions and translations are written in
    pub user_lang: Language,
    /// Language stories are written in, until the stored preference is read
    pub practice_lang: Language,
}

impl SessionConfig {
    pub fn from_env(env: &Env) -> Self {
        Self {
            user_id: env.string("VOCORA_USER_ID"),
            user_lang: env.parsed("VOCORA_USER_LANG").unwrap_or_default(),
            practice_lang: env.parsed("VOCORA_PRACTICE_LANG").unwrap_or_default(),
        }
    }
}
