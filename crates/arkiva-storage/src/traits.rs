//! Storage abstraction trait
//!
//! This module defines the ObjectStore trait that all storage backends must
//! implement.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends must implement this trait. Objects are addressed by
/// the key convention from `arkiva_core::keys` (`{file_id}_{file_name}`);
/// backends treat keys as opaque strings.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Read an object's bytes by key
    async fn get(&self, key: &str) -> StorageResult<Bytes>;

    /// Write an object under `key`, replacing any previous content
    async fn put(&self, key: &str, content_type: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Check if an object exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Delete an object by key
    ///
    /// Deleting a missing object is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;
}
