//! Shared object-key convention for stored files.
//!
//! Key format: `{file_id}_{file_name}`. The identifier prefix is what ties an
//! object-store notification back to a registered file, so every upload path
//! must use this format.

use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("object key {0:?} has no '_' separator")]
    MissingSeparator(String),

    #[error("object key {key:?} does not start with a file identifier")]
    InvalidIdentifier {
        key: String,
        #[source]
        source: uuid::Error,
    },
}

/// Generate the object-store key for a file.
pub fn object_key(file_id: Uuid, file_name: &str) -> String {
    format!("{}_{}", file_id, file_name)
}

/// Extract the file identifier from an object-store key.
///
/// Splits on the first `_`; everything after it is the file name and may
/// itself contain underscores. Returns the identifier and the name tail.
pub fn parse_object_key(key: &str) -> Result<(Uuid, &str), KeyError> {
    let (id_part, name) = key
        .split_once('_')
        .ok_or_else(|| KeyError::MissingSeparator(key.to_string()))?;
    let file_id = Uuid::parse_str(id_part).map_err(|source| KeyError::InvalidIdentifier {
        key: key.to_string(),
        source,
    })?;
    Ok((file_id, name))
}
