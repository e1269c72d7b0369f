//! Arkiva Core Library
//!
//! This crate provides the domain models, error types, configuration, the
//! signed-URL codec, and the storage-event parser shared across all Arkiva
//! components.

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod keys;
pub mod models;
pub mod signing;

// Re-export commonly used types
pub use catalog::{CatalogError, FileCatalog, MemoryCatalog};
pub use config::AppConfig;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use events::{parse_notification, EventError, StorageEvent};
pub use keys::{object_key, parse_object_key, KeyError};
pub use models::file::{FileKind, FileRecord, FileResponse, InvalidDerivation};
pub use signing::{sign_download_url, verify_download_url, SignatureError, SignedUrl};
