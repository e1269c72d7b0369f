//! Thumbnail pipeline: gate → resolve → generate → record.
//!
//! Drives one object-store event through the decision sequence that ends in a
//! created thumbnail, a deliberate no-op, or a rejection. The checks run in a
//! fixed order: feature flag, bucket, key layout, catalog lookup, kind,
//! declared content type. Only an event that clears all six reaches the
//! generator.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use arkiva_core::catalog::{CatalogError, FileCatalog};
use arkiva_core::config::AppConfig;
use arkiva_core::events::StorageEvent;
use arkiva_core::keys::{parse_object_key, KeyError};
use arkiva_core::models::FileRecord;
use arkiva_storage::{ObjectStore, StorageError};

use crate::thumbnail::{ThumbnailError, ThumbnailGenerator};
use crate::workspace::Workspace;

const THUMBNAIL_CONTENT_TYPE: &str = "image/png";

/// Pipeline rejection reasons.
///
/// Anything here means the event was genuinely invalid or the generation
/// step itself failed. Conditions the pipeline anticipates (foreign bucket,
/// re-delivered event, unsupported type) are not errors; they come back as
/// [`IngestOutcome::Skipped`].
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("thumbnail generation is disabled")]
    FeatureDisabled,

    #[error("object key {key:?} does not carry a file identifier")]
    UnrecognizedKey {
        key: String,
        #[source]
        source: KeyError,
    },

    #[error("no catalog entry for file {0}")]
    UnknownFile(Uuid),

    #[error("thumbnail generation failed for file {id}: {source}")]
    GenerationFailed {
        id: Uuid,
        #[source]
        source: ThumbnailError,
    },

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("workspace error: {0}")]
    Workspace(#[from] std::io::Error),
}

/// Why an event was acknowledged without creating anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The event is for a bucket this deployment does not manage.
    ForeignBucket,
    /// The referenced file is already derived output, or a thumbnail for
    /// the original exists from an earlier delivery.
    AlreadyDerived,
    /// The declared content type is outside the supported set.
    UnsupportedContentType,
}

/// Terminal pipeline outcome for one event.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    Created(FileRecord),
    Skipped(SkipReason),
}

/// Pipeline configuration, lifted out of [`AppConfig`] at construction time.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub enabled: bool,
    pub media_bucket: String,
    pub supported_content_types: Vec<String>,
    pub workspace_root: PathBuf,
}

impl From<&AppConfig> for IngestConfig {
    fn from(config: &AppConfig) -> Self {
        IngestConfig {
            enabled: config.thumbnails_enabled,
            media_bucket: config.media_bucket.clone(),
            supported_content_types: config.thumbnail_content_types.clone(),
            workspace_root: config.thumbnail_workspace_dir.clone(),
        }
    }
}

/// Event-driven thumbnail pipeline.
pub struct ThumbnailPipeline {
    catalog: Arc<dyn FileCatalog>,
    store: Arc<dyn ObjectStore>,
    generator: Arc<dyn ThumbnailGenerator>,
    config: IngestConfig,
}

impl ThumbnailPipeline {
    pub fn new(
        catalog: Arc<dyn FileCatalog>,
        store: Arc<dyn ObjectStore>,
        generator: Arc<dyn ThumbnailGenerator>,
        config: IngestConfig,
    ) -> Self {
        Self {
            catalog,
            store,
            generator,
            config,
        }
    }

    /// Run one event through the pipeline.
    #[tracing::instrument(
        skip(self, event),
        fields(bucket = %event.bucket, object_key = %event.object_key)
    )]
    pub async fn handle_event(&self, event: &StorageEvent) -> Result<IngestOutcome, IngestError> {
        if !self.config.enabled {
            return Err(IngestError::FeatureDisabled);
        }

        // Foreign buckets are filtered before the key is inspected, so their
        // keys never have to parse.
        if event.bucket != self.config.media_bucket {
            tracing::debug!("event for foreign bucket acknowledged without action");
            return Ok(IngestOutcome::Skipped(SkipReason::ForeignBucket));
        }

        let (file_id, _) =
            parse_object_key(&event.object_key).map_err(|source| IngestError::UnrecognizedKey {
                key: event.object_key.clone(),
                source,
            })?;

        let original = self
            .catalog
            .get(file_id)
            .await?
            .ok_or(IngestError::UnknownFile(file_id))?;

        if original.is_thumbnail() {
            tracing::debug!(file_id = %file_id, "event references derived output, nothing to do");
            return Ok(IngestOutcome::Skipped(SkipReason::AlreadyDerived));
        }

        // The declared type from the event gates generation, not whatever the
        // catalog recorded at registration time.
        let supported = self
            .config
            .supported_content_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&event.content_type));
        if !supported {
            tracing::debug!(
                file_id = %file_id,
                content_type = %event.content_type,
                "declared content type is not supported"
            );
            return Ok(IngestOutcome::Skipped(SkipReason::UnsupportedContentType));
        }

        self.derive_thumbnail(&original, event).await
    }

    async fn derive_thumbnail(
        &self,
        original: &FileRecord,
        event: &StorageEvent,
    ) -> Result<IngestOutcome, IngestError> {
        let data = self.store.get(&event.object_key).await?;

        let workspace = Workspace::create_in(&self.config.workspace_root)?;
        let rendered = self.generator.generate(&data, workspace.path()).await;
        let released = workspace.close();

        // A generation failure outranks a cleanup failure; the cleanup error
        // only surfaces when generation itself succeeded.
        let rendered = rendered.map_err(|source| IngestError::GenerationFailed {
            id: original.id,
            source,
        })?;
        released?;

        let thumb = FileRecord::thumbnail_of(
            original,
            thumbnail_name(&original.name),
            THUMBNAIL_CONTENT_TYPE,
        )
        .map_err(CatalogError::from)?;

        self.store
            .put(&thumb.object_key(), THUMBNAIL_CONTENT_TYPE, rendered.to_vec())
            .await?;

        match self.catalog.insert(thumb.clone()).await {
            Ok(()) => {}
            Err(CatalogError::ThumbnailExists { original: existing }) => {
                // Re-delivered event: an earlier delivery already registered a
                // thumbnail for this original. Remove the object this attempt
                // uploaded and acknowledge.
                self.store.delete(&thumb.object_key()).await?;
                tracing::info!(
                    original_id = %existing,
                    "thumbnail already recorded, duplicate delivery acknowledged"
                );
                return Ok(IngestOutcome::Skipped(SkipReason::AlreadyDerived));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(
            thumbnail_id = %thumb.id,
            original_id = %original.id,
            object_key = %thumb.object_key(),
            "thumbnail created"
        );
        Ok(IngestOutcome::Created(thumb))
    }
}

/// Thumbnail file name derived from the original's name.
fn thumbnail_name(original_name: &str) -> String {
    let stem = Path::new(original_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(original_name);
    format!("{stem}_thumb.png")
}
