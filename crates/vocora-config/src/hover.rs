use serde::{Deserialize, Serialize};

use crate::Env;

fn default_debounce_ms() -> u64 {
    1500
}

fn default_marker_open() -> String {
    "<mark>".to_string()
}

fn default_marker_close() -> String {
    "</mark>".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct HoverConfig {
    /// How long a pointer must rest on a word before its definition is fetched
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_marker_open")]
    pub marker_open: String,
    #[serde(default = "default_marker_close")]
    pub marker_close: String,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            marker_open: default_marker_open(),
            marker_close: default_marker_close(),
        }
    }
}

impl HoverConfig {
    pub fn from_env(env: &Env) -> Self {
        Self {
            debounce_ms: env.parsed("HOVER_DEBOUNCE_MS").unwrap_or(default_debounce_ms()),
            ..Self::default()
        }
    }
}
