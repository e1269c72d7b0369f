//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};

use arkiva_core::{AppConfig, MemoryCatalog};
use arkiva_processing::ImageThumbnailer;
use arkiva_storage::LocalStore;

use crate::state::AppState;

/// Initialize the entire application
pub async fn initialize_app(config: AppConfig) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    // Initialize telemetry first
    crate::telemetry::init_telemetry();

    tracing::info!("Configuration loaded and validated successfully");

    // Setup storage and the catalog
    let store = Arc::new(LocalStore::new(config.storage_dir.clone()).await?);
    let catalog = Arc::new(MemoryCatalog::new());
    let generator = Arc::new(ImageThumbnailer::new(config.thumbnail_max_dimension));

    let state = Arc::new(AppState::new(config.clone(), catalog, store, generator));

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
