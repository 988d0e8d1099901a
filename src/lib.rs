//! Users Service
//!
//! A small HTTP service for creating, reading, updating and deleting users,
//! backed by PostgreSQL or an in-memory store.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use tracing::info;

use api::state::AppState;
use infrastructure::storage::{StorageConfig, StorageFactory};

/// Build the application state from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage = StorageConfig::from_app_config(config)?;
    info!(backend = ?storage.storage_type(), "Initializing user storage");

    let repository = StorageFactory::create_user_repository(&storage).await?;

    Ok(AppState::new(repository))
}
