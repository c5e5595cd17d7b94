mod client;
mod memory;
mod rows;

use std::sync::Arc;

pub use client::RestStore;
pub use memory::MemoryStore;

use vocora_config::store::StoreConfig;
use vocora_core::{DefinitionStore, PreferenceStore, StoreError, VocabStore};

/// One backend behind all three store traits
#[derive(Clone)]
pub struct Stores {
    pub definitions: Arc<dyn DefinitionStore>,
    pub vocab: Arc<dyn VocabStore>,
    pub preferences: Arc<dyn PreferenceStore>,
}

impl Stores {
    fn from_backend<S>(backend: Arc<S>) -> Self
    where
        S: DefinitionStore + VocabStore + PreferenceStore + 'static,
    {
        Self {
            definitions: backend.clone(),
            vocab: backend.clone(),
            preferences: backend,
        }
    }

    /// Hosted tables when configured, otherwise an error
    pub fn remote(config: &StoreConfig) -> Result<Self, StoreError> {
        let store = RestStore::from_config(config)?;
        tracing::info!(url = %config.url, "using hosted store");
        Ok(Self::from_backend(Arc::new(store)))
    }

    /// Process-local store that forgets everything on exit
    pub fn memory() -> Self {
        tracing::info!("using in-memory store");
        Self::from_backend(Arc::new(MemoryStore::new()))
    }
}
