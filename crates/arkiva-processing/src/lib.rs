//! Arkiva Processing Library
//!
//! Thumbnail generation and the webhook ingestion pipeline that drives it:
//! an "object created" notification comes in, the pipeline decides whether a
//! thumbnail must be derived, and the generator produces it inside a scoped
//! scratch workspace.

pub mod pipeline;
pub mod thumbnail;
pub mod workspace;

pub use pipeline::{IngestConfig, IngestError, IngestOutcome, SkipReason, ThumbnailPipeline};
pub use thumbnail::{ImageThumbnailer, ThumbnailError, ThumbnailGenerator};
pub use workspace::Workspace;
