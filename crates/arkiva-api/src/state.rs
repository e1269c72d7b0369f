//! Application state shared by all handlers.
//!
//! One `Arc<AppState>` is built at startup and cloned into every request; it
//! carries the configuration and the collaborators the handlers talk to. The
//! pipeline holds its own clones of the catalog and store, so swapping a
//! backend means changing the wiring in one place.

use std::sync::Arc;

use arkiva_core::catalog::FileCatalog;
use arkiva_core::AppConfig;
use arkiva_processing::{IngestConfig, ThumbnailGenerator, ThumbnailPipeline};
use arkiva_storage::ObjectStore;

pub struct AppState {
    pub config: AppConfig,
    pub catalog: Arc<dyn FileCatalog>,
    pub store: Arc<dyn ObjectStore>,
    pub pipeline: ThumbnailPipeline,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        catalog: Arc<dyn FileCatalog>,
        store: Arc<dyn ObjectStore>,
        generator: Arc<dyn ThumbnailGenerator>,
    ) -> Self {
        let pipeline = ThumbnailPipeline::new(
            catalog.clone(),
            store.clone(),
            generator,
            IngestConfig::from(&config),
        );
        AppState {
            config,
            catalog,
            store,
            pipeline,
        }
    }
}
