//! Application state and initialization
//!
//! Builds the store selected by configuration and the services on top of
//! it. The resulting AppState is shared by every request handler.

use crate::config::{AppConfig, StoreBackend};
use crate::error::Result;
use crate::services::NotesService;
use crate::storage::{MemoryStore, NoteStore, RedisStore};
use std::sync::Arc;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub notes_service: NotesService,
}

impl AppState {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self {
            notes_service: NotesService::new(store),
        }
    }
}

/// Application setup - called once on startup
pub async fn setup(config: &AppConfig) -> Result<AppState> {
    tracing::info!("Initializing application");

    let store: Arc<dyn NoteStore> = match &config.store {
        StoreBackend::Redis { url } => Arc::new(RedisStore::connect(url).await?),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; notes will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    tracing::info!("Application initialized successfully");

    Ok(AppState::new(store))
}
