use std::sync::Arc;

use crate::db::{MemoryStore, Store};
use crate::services::{ServiceConfig, Services};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: ServiceConfig) -> Self {
        Self {
            services: Services::new(store, config),
        }
    }

    /// State over a fresh in-memory store with default settings
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), ServiceConfig::default())
    }
}
