use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::keys;

/// Role a file plays within its document.
///
/// Exactly one kind per file, fixed at creation. A `Thumbnail` always points
/// back at the `Original` it was derived from; an `Original` never points
/// anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileKind {
    Original,
    Thumbnail,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidDerivation {
    #[error("a THUMBNAIL file must reference the ORIGINAL it was derived from")]
    MissingSource,

    #[error("an ORIGINAL file must not reference a source file")]
    UnexpectedSource,

    #[error("a THUMBNAIL can only be derived from an ORIGINAL file")]
    SourceNotOriginal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: Uuid,
    pub document_id: Uuid,
    pub name: String,
    pub kind: FileKind,
    pub derived_from: Option<Uuid>,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
}

impl FileRecord {
    /// Create an original file record for a document.
    pub fn original(
        document_id: Uuid,
        name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        FileRecord {
            id: Uuid::new_v4(),
            document_id,
            name: name.into(),
            kind: FileKind::Original,
            derived_from: None,
            content_type: content_type.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a thumbnail record derived from `original`.
    ///
    /// Refuses to derive from anything that is not an `Original`, so a
    /// thumbnail-of-a-thumbnail chain cannot be constructed.
    pub fn thumbnail_of(
        original: &FileRecord,
        name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Result<Self, InvalidDerivation> {
        if original.kind != FileKind::Original {
            return Err(InvalidDerivation::SourceNotOriginal);
        }
        Ok(FileRecord {
            id: Uuid::new_v4(),
            document_id: original.document_id,
            name: name.into(),
            kind: FileKind::Thumbnail,
            derived_from: Some(original.id),
            content_type: content_type.into(),
            created_at: Utc::now(),
        })
    }

    /// Check the kind/derivation shape of this record.
    ///
    /// Catalogs call this before accepting a record; it guards against
    /// hand-built records that bypass the constructors.
    pub fn validate(&self) -> Result<(), InvalidDerivation> {
        match (self.kind, self.derived_from) {
            (FileKind::Thumbnail, None) => Err(InvalidDerivation::MissingSource),
            (FileKind::Original, Some(_)) => Err(InvalidDerivation::UnexpectedSource),
            _ => Ok(()),
        }
    }

    /// The object-store key this record's bytes live under.
    pub fn object_key(&self) -> String {
        keys::object_key(self.id, &self.name)
    }

    pub fn is_thumbnail(&self) -> bool {
        self.kind == FileKind::Thumbnail
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileResponse {
    pub id: Uuid,
    pub document_id: Uuid,
    pub name: String,
    pub kind: FileKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<Uuid>,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<FileRecord> for FileResponse {
    fn from(file: FileRecord) -> Self {
        FileResponse {
            id: file.id,
            document_id: file.document_id,
            name: file.name,
            kind: file.kind,
            derived_from: file.derived_from,
            content_type: file.content_type,
            created_at: file.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_has_no_source() {
        let file = FileRecord::original(Uuid::new_v4(), "report.pdf", "application/pdf");
        assert_eq!(file.kind, FileKind::Original);
        assert_eq!(file.derived_from, None);
        assert!(file.validate().is_ok());
    }

    #[test]
    fn test_thumbnail_points_at_its_original() {
        let original = FileRecord::original(Uuid::new_v4(), "photo.png", "image/png");
        let thumb = FileRecord::thumbnail_of(&original, "photo_thumb.png", "image/png")
            .expect("derivation from an original succeeds");

        assert_eq!(thumb.kind, FileKind::Thumbnail);
        assert_eq!(thumb.derived_from, Some(original.id));
        assert_eq!(thumb.document_id, original.document_id);
        assert!(thumb.validate().is_ok());
    }

    #[test]
    fn test_thumbnail_of_thumbnail_is_refused() {
        let original = FileRecord::original(Uuid::new_v4(), "photo.png", "image/png");
        let thumb = FileRecord::thumbnail_of(&original, "photo_thumb.png", "image/png").unwrap();

        let err = FileRecord::thumbnail_of(&thumb, "photo_thumb_thumb.png", "image/png")
            .expect_err("derivation from a thumbnail must fail");
        assert_eq!(err, InvalidDerivation::SourceNotOriginal);
    }

    #[test]
    fn test_validate_rejects_thumbnail_without_source() {
        let mut file = FileRecord::original(Uuid::new_v4(), "photo.png", "image/png");
        file.kind = FileKind::Thumbnail;
        assert_eq!(file.validate(), Err(InvalidDerivation::MissingSource));
    }

    #[test]
    fn test_validate_rejects_original_with_source() {
        let mut file = FileRecord::original(Uuid::new_v4(), "photo.png", "image/png");
        file.derived_from = Some(Uuid::new_v4());
        assert_eq!(file.validate(), Err(InvalidDerivation::UnexpectedSource));
    }

    #[test]
    fn test_object_key_embeds_id_and_name() {
        let file = FileRecord::original(Uuid::new_v4(), "photo.png", "image/png");
        assert_eq!(file.object_key(), format!("{}_photo.png", file.id));
    }

    #[test]
    fn test_kind_serializes_upper_case() {
        let json = serde_json::to_string(&FileKind::Thumbnail).unwrap();
        assert_eq!(json, "\"THUMBNAIL\"");
        let json = serde_json::to_string(&FileKind::Original).unwrap();
        assert_eq!(json, "\"ORIGINAL\"");
    }
}
