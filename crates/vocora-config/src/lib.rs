use std::collections::HashMap;
use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::generator::GeneratorConfig;
use self::hover::HoverConfig;
use self::session::SessionConfig;
use self::store::StoreConfig;

pub mod generator;
pub mod hover;
pub mod session;
pub mod store;

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub store: StoreConfig,
    pub hover: HoverConfig,
    pub session: SessionConfig,

    /// Emit logs as JSON lines instead of human readable text
    pub log_json: bool,
}

impl Config {
    /// Build from process environment variables
    pub fn new() -> Self {
        Self::from_env(&Env::process())
    }

    pub fn from_env(env: &Env) -> Self {
        Config {
            generator: GeneratorConfig::from_env(env),
            store: StoreConfig::from_env(env),
            hover: HoverConfig::from_env(env),
            session: SessionConfig::from_env(env),

            log_json: env.parsed("VOCORA_LOG_JSON").unwrap_or(false),
        }
    }
}

/// Source of configuration variables
pub enum Env {
    Process,
    Fixed(HashMap<String, String>),
}

impl Env {
    pub fn process() -> Self {
        Env::Process
    }

    pub fn fixed<'a>(vars: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Env::Fixed(
            vars.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// Non-empty value of a variable
    pub fn string(&self, key: &str) -> Option<String> {
        let value = match self {
            Env::Process => env::var(key).ok(),
            Env::Fixed(vars) => vars.get(key).cloned(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    pub fn parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        self.string(key).and_then(|v| v.trim().parse().ok())
    }
}
