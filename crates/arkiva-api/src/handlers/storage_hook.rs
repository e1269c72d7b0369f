//! Object store notification endpoint.
//!
//! The store POSTs a notification here whenever an object lands in a
//! bucket. Each record is fed through the thumbnail pipeline; the ack
//! reports what was created and what was deliberately skipped.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use arkiva_core::models::file::FileResponse;
use arkiva_core::parse_notification;
use arkiva_processing::IngestOutcome;

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Summary of what a notification delivery produced.
#[derive(Debug, Serialize, ToSchema)]
pub struct HookAck {
    /// Number of event records in the delivery.
    pub received: usize,
    /// Thumbnails recorded by this delivery.
    pub created: Vec<FileResponse>,
    /// Records skipped without producing anything.
    pub skipped: usize,
}

/// Liveness probe for the notification endpoint.
///
/// Object stores ping the configured endpoint before enabling
/// notifications. Always answers 200 without touching the pipeline.
#[utoipa::path(
    get,
    path = "/api/v0/storage/hook",
    tag = "storage",
    responses(
        (status = 200, description = "Endpoint is reachable")
    )
)]
pub async fn probe_hook() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Accept a bucket notification and derive thumbnails from it.
#[utoipa::path(
    post,
    path = "/api/v0/storage/hook",
    tag = "storage",
    responses(
        (status = 200, description = "Delivery processed, nothing created", body = HookAck),
        (status = 201, description = "At least one thumbnail created", body = HookAck),
        (status = 400, description = "Malformed notification or unusable record", body = crate::error::ErrorResponse),
        (status = 403, description = "Thumbnail generation is disabled", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, payload), fields(operation = "receive_storage_hook"))]
pub async fn receive_hook(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<serde_json::Value>,
) -> Result<(StatusCode, Json<HookAck>), HttpAppError> {
    let events = parse_notification(payload)?;
    let received = events.len();

    let mut created = Vec::new();
    let mut skipped = 0;

    for event in events {
        match state.pipeline.handle_event(&event).await? {
            IngestOutcome::Created(record) => created.push(FileResponse::from(record)),
            IngestOutcome::Skipped(reason) => {
                tracing::debug!(?reason, "Notification record skipped");
                skipped += 1;
            }
        }
    }

    let ack = HookAck {
        received,
        created,
        skipped,
    };
    let status = if ack.created.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    tracing::info!(
        received = ack.received,
        created = ack.created.len(),
        skipped = ack.skipped,
        "Storage notification processed"
    );

    Ok((status, Json(ack)))
}
