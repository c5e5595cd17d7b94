use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use vocora_config::Config;
use vocora_core::{DefinitionCache, SessionContext};
use vocora_generator::{DefinitionGenerator, OpenAiGenerator, StoryGenerator};
use vocora_store::Stores;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub stores: Stores,
    pub cache: Arc<DefinitionCache>,
    pub stories: Arc<dyn StoryGenerator>,
    pub session: SessionContext,
}

impl AppState {
    /// Wire the hosted store and generation service from `config`
    pub fn new(config: Config, offline: bool) -> anyhow::Result<Self> {
        let stores = if offline {
            Stores::memory()
        } else if !config.store.is_configured() {
            tracing::warn!("store url or key missing, nothing will outlive this run");
            Stores::memory()
        } else {
            Stores::remote(&config.store)?
        };

        if config.generator.api_key.is_empty() {
            tracing::warn!("OPENAI_API_KEY is not set, definitions will be unavailable");
        }

        let generator = Arc::new(
            OpenAiGenerator::new(
                config.generator.api_key.clone(),
                config.generator.api_url.clone(),
                Duration::from_secs(config.generator.timeout_seconds),
            )?
            .with_models(
                config.generator.definition_model.clone(),
                config.generator.story_model.clone(),
            ),
        );

        Ok(Self::with_parts(config, stores, generator.clone(), generator))
    }

    pub fn with_parts(
        config: Config,
        stores: Stores,
        definitions: Arc<dyn DefinitionGenerator>,
        stories: Arc<dyn StoryGenerator>,
    ) -> Self {
        let cache = DefinitionCache::new(stores.definitions.clone(), definitions)
            .with_retries(config.generator.retries);

        Self {
            session: SessionContext::new(stores.preferences.clone()),
            cache: Arc::new(cache),
            stores,
            stories,
            config: Arc::new(RwLock::new(config)),
        }
    }
}
