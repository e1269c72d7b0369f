//! Object-store notification parsing.
//!
//! MinIO delivers deeply nested S3-style notifications. Only three values
//! matter downstream, so the payload is narrowed here into `StorageEvent`
//! records and the raw shape never leaves this module.

use percent_encoding::percent_decode_str;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("malformed storage event: {0}")]
    Malformed(String),
}

/// One "object created" record, narrowed to what the pipeline consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub bucket: String,
    pub object_key: String,
    pub content_type: String,
}

#[derive(Debug, Deserialize)]
struct Notification {
    #[serde(rename = "Records")]
    records: Vec<EventRecord>,
}

#[derive(Debug, Deserialize)]
struct EventRecord {
    s3: S3Entity,
}

#[derive(Debug, Deserialize)]
struct S3Entity {
    bucket: BucketInfo,
    object: ObjectInfo,
}

#[derive(Debug, Deserialize)]
struct BucketInfo {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ObjectInfo {
    key: String,
    #[serde(rename = "contentType")]
    content_type: String,
}

/// Parse a webhook payload into storage events.
///
/// Object keys arrive percent-encoded and are decoded here. Any missing
/// required field, an undecodable key, or an empty record list is reported
/// as `Malformed`; the caller treats that as a bad request, not a crash.
pub fn parse_notification(payload: serde_json::Value) -> Result<Vec<StorageEvent>, EventError> {
    let notification: Notification =
        serde_json::from_value(payload).map_err(|err| EventError::Malformed(err.to_string()))?;

    if notification.records.is_empty() {
        return Err(EventError::Malformed(
            "payload contains no records".to_string(),
        ));
    }

    notification
        .records
        .into_iter()
        .map(|record| {
            let object_key = percent_decode_str(&record.s3.object.key)
                .decode_utf8()
                .map_err(|err| {
                    EventError::Malformed(format!("object key is not valid UTF-8: {}", err))
                })?
                .into_owned();
            Ok(StorageEvent {
                bucket: record.s3.bucket.name,
                object_key,
                content_type: record.s3.object.content_type,
            })
        })
        .collect()
}
