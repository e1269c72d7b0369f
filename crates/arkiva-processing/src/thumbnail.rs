//! Thumbnail rendering from original image bytes.

use std::io::Cursor;
use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use image::{ImageFormat, ImageReader};
use thiserror::Error;

use arkiva_core::config::THUMBNAIL_MAX_DIMENSION;

/// Thumbnail rendering errors
#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("Decode failed: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Encode failed: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Scratch IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generation failed: {0}")]
    Failed(String),
}

/// Thumbnail rendering abstraction
///
/// Implementations take the original's raw bytes and return encoded thumbnail
/// bytes. `scratch` is a private directory for intermediate artifacts; the
/// caller reclaims it after the call, so implementations do not clean up
/// anything they leave there.
#[async_trait]
pub trait ThumbnailGenerator: Send + Sync {
    async fn generate(&self, original: &[u8], scratch: &Path) -> Result<Bytes, ThumbnailError>;
}

/// Generator for raster images, backed by the `image` crate.
///
/// Renders a PNG bounded by `max_dimension` on the longer side, preserving
/// aspect ratio. Images already within bounds are not upscaled.
pub struct ImageThumbnailer {
    max_dimension: u32,
}

impl ImageThumbnailer {
    pub fn new(max_dimension: u32) -> Self {
        Self { max_dimension }
    }

    fn render_to(data: &[u8], max_dimension: u32, out: &Path) -> Result<(), ThumbnailError> {
        let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
        let img = reader.decode().map_err(ThumbnailError::Decode)?;
        let thumb = img.thumbnail(max_dimension, max_dimension);
        thumb
            .save_with_format(out, ImageFormat::Png)
            .map_err(ThumbnailError::Encode)?;
        Ok(())
    }
}

impl Default for ImageThumbnailer {
    fn default() -> Self {
        Self::new(THUMBNAIL_MAX_DIMENSION)
    }
}

#[async_trait]
impl ThumbnailGenerator for ImageThumbnailer {
    async fn generate(&self, original: &[u8], scratch: &Path) -> Result<Bytes, ThumbnailError> {
        let staged = scratch.join("thumbnail.png");
        let data = original.to_vec();
        let max_dimension = self.max_dimension;
        let out = staged.clone();
        // Image decode is CPU-bound; run off the async pool to avoid blocking other tasks.
        tokio::task::spawn_blocking(move || Self::render_to(&data, max_dimension, &out))
            .await
            .map_err(|e| ThumbnailError::Failed(format!("render task aborted: {e}")))??;

        let bytes = tokio::fs::read(&staged).await?;
        tracing::debug!(
            staged = %staged.display(),
            size_bytes = bytes.len(),
            "thumbnail rendered"
        );
        Ok(Bytes::from(bytes))
    }
}
