//! File catalog collaborator.
//!
//! The catalog owns file metadata: lookup by identifier and registration of
//! new records. The thumbnail pipeline and the API talk to it through the
//! `FileCatalog` trait so deployments can back it with their own metadata
//! store; `MemoryCatalog` is the in-process implementation used by the
//! default wiring and by tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::file::{FileKind, FileRecord, InvalidDerivation};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("file {0} is already registered")]
    DuplicateId(Uuid),

    #[error("a thumbnail derived from file {original} already exists")]
    ThumbnailExists { original: Uuid },

    #[error("file record violates the derivation invariant")]
    InvalidLink(#[from] InvalidDerivation),

    #[error("derivation source {0} does not exist")]
    MissingSource(Uuid),

    #[error("catalog backend error: {0}")]
    Backend(String),
}

/// Lookup and registration interface onto the file catalog.
#[async_trait]
pub trait FileCatalog: Send + Sync {
    /// Look up a file record by identifier.
    async fn get(&self, id: Uuid) -> Result<Option<FileRecord>, CatalogError>;

    /// Register a new file record.
    ///
    /// Implementations must uphold the derivation invariant: a thumbnail
    /// references an existing original, an original references nothing, and
    /// at most one thumbnail exists per original.
    async fn insert(&self, record: FileRecord) -> Result<(), CatalogError>;
}

/// In-process catalog backed by a map.
#[derive(Clone, Default)]
pub struct MemoryCatalog {
    files: Arc<Mutex<HashMap<Uuid, FileRecord>>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered records.
    pub async fn len(&self) -> usize {
        self.files.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.files.lock().await.is_empty()
    }

    /// The thumbnail derived from `original`, if one has been registered.
    pub async fn thumbnail_for(&self, original: Uuid) -> Option<FileRecord> {
        self.files
            .lock()
            .await
            .values()
            .find(|file| file.kind == FileKind::Thumbnail && file.derived_from == Some(original))
            .cloned()
    }
}

#[async_trait]
impl FileCatalog for MemoryCatalog {
    async fn get(&self, id: Uuid) -> Result<Option<FileRecord>, CatalogError> {
        Ok(self.files.lock().await.get(&id).cloned())
    }

    async fn insert(&self, record: FileRecord) -> Result<(), CatalogError> {
        record.validate()?;

        let mut files = self.files.lock().await;
        if files.contains_key(&record.id) {
            return Err(CatalogError::DuplicateId(record.id));
        }

        if let Some(source_id) = record.derived_from {
            let source = files
                .get(&source_id)
                .ok_or(CatalogError::MissingSource(source_id))?;
            if source.kind != FileKind::Original {
                return Err(CatalogError::InvalidLink(
                    InvalidDerivation::SourceNotOriginal,
                ));
            }
            let duplicate = files.values().any(|file| {
                file.kind == FileKind::Thumbnail && file.derived_from == record.derived_from
            });
            if duplicate {
                return Err(CatalogError::ThumbnailExists {
                    original: source_id,
                });
            }
        }

        files.insert(record.id, record);
        Ok(())
    }
}
