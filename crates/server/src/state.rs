//! Application state shared across handlers.

use satchel_core::{AppConfig, WordCorpus};
use satchel_store::FolderStore;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The folder store.
    pub store: Arc<FolderStore>,
    /// The word corpus backing identifier allocation, loaded once at startup.
    pub corpus: Arc<WordCorpus>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: AppConfig, store: Arc<FolderStore>, corpus: Arc<WordCorpus>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            corpus,
        }
    }
}
