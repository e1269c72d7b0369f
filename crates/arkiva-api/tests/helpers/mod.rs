//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p arkiva-api --test storage_hook_test`
//! or `cargo test -p arkiva-api`. Everything runs in-process against the
//! in-memory catalog and store; no external services are required.

pub mod fixtures;

use std::path::Path;
use std::sync::Arc;

use axum_test::TestServer;
use tempfile::TempDir;
use uuid::Uuid;

use arkiva_api::constants;
use arkiva_api::setup::routes;
use arkiva_api::state::AppState;
use arkiva_core::catalog::FileCatalog;
use arkiva_core::config::BaseConfig;
use arkiva_core::models::file::FileRecord;
use arkiva_core::{AppConfig, MemoryCatalog};
use arkiva_processing::ImageThumbnailer;
use arkiva_storage::{MemoryStore, ObjectStore};

/// Signing secret used by every test app (minimum length is 32).
pub const TEST_SECRET: &str = "test-secret-key-min-32-characters-long-for-testing";

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus handles onto the backing stores.
///
/// `catalog` and `store` share state with the ones inside the app, so tests
/// can seed files and inspect what the handlers did.
pub struct TestApp {
    pub server: TestServer,
    pub catalog: MemoryCatalog,
    pub store: MemoryStore,
    pub workspace_root: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Register an original file and store its bytes, as an upload would.
    pub async fn seed_original(&self, name: &str, content_type: &str, data: Vec<u8>) -> FileRecord {
        let record = FileRecord::original(Uuid::new_v4(), name, content_type);
        self.store
            .put(&record.object_key(), content_type, data)
            .await
            .expect("seed object into store");
        self.catalog
            .insert(record.clone())
            .await
            .expect("seed record into catalog");
        record
    }

    /// Number of entries left under the thumbnail workspace root.
    ///
    /// The pipeline creates the root lazily, so a missing directory counts
    /// as empty.
    pub fn workspace_leftovers(&self) -> usize {
        match std::fs::read_dir(self.workspace_root.path()) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        }
    }
}

/// Setup test app with the default configuration.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Setup test app, letting the caller tweak the configuration first.
pub async fn setup_test_app_with(adjust: impl FnOnce(&mut AppConfig)) -> TestApp {
    let workspace_root = tempfile::tempdir().expect("Failed to create temp directory");
    let mut config = create_test_config(workspace_root.path());
    adjust(&mut config);

    let catalog = MemoryCatalog::new();
    let store = MemoryStore::new();
    let generator = Arc::new(ImageThumbnailer::new(config.thumbnail_max_dimension));

    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(catalog.clone()),
        Arc::new(store.clone()),
        generator,
    ));

    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        catalog,
        store,
        workspace_root,
    }
}

fn create_test_config(workspace_dir: &Path) -> AppConfig {
    let base = BaseConfig {
        server_port: 4000,
        cors_origins: vec!["*".to_string()],
        secret_key: TEST_SECRET.to_string(),
        environment: "test".to_string(),
    };
    AppConfig {
        base,
        download_url_lifetime_secs: 3600,
        media_bucket: "arkiva-media".to_string(),
        storage_dir: workspace_dir.join("objects"),
        thumbnails_enabled: true,
        thumbnail_content_types: vec![
            "image/jpeg".into(),
            "image/png".into(),
            "image/gif".into(),
            "image/webp".into(),
        ],
        thumbnail_workspace_dir: workspace_dir.to_path_buf(),
        thumbnail_max_dimension: 300,
    }
}
