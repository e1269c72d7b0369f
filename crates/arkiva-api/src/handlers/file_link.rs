//! Issuing signed download links.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use arkiva_core::{sign_download_url, AppError};

use crate::error::HttpAppError;
use crate::handlers::request_origin;
use crate::state::AppState;

/// A signed link ready to hand to a client.
#[derive(Debug, Serialize, ToSchema)]
pub struct SignedLinkResponse {
    /// Bare download URL without query parameters.
    pub url: String,
    /// Unix timestamp after which the link stops verifying.
    pub expires_at: i64,
    pub signature: String,
    /// The full URL clients should use, query parameters included.
    pub download_url: String,
}

/// Issue a time-limited signed download link for a file.
///
/// The signature covers the full URL as seen by the client, so the link only
/// verifies against the same scheme and host it was issued for.
#[utoipa::path(
    post,
    path = "/api/v0/files/{id}/link",
    tag = "files",
    params(
        ("id" = Uuid, Path, description = "File identifier")
    ),
    responses(
        (status = 201, description = "Signed link issued", body = SignedLinkResponse),
        (status = 404, description = "File not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Catalog failure", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, headers), fields(file_id = %id, operation = "issue_download_link"))]
pub async fn issue_download_link(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<SignedLinkResponse>), HttpAppError> {
    let record = state
        .catalog
        .get(id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Catalog error fetching file for link issuance");
            AppError::Internal(format!("Catalog error: {}", e))
        })?
        .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

    let (scheme, host) = request_origin(&headers);
    let signed = sign_download_url(
        record.id,
        &host,
        &scheme,
        state.config.download_url_lifetime_secs,
        &state.config.base.secret_key,
        Utc::now(),
    );

    tracing::info!(expires_at = signed.expires_at, "Download link issued");

    let download_url = format!(
        "{}?expires={}&signature={}",
        signed.url, signed.expires_at, signed.signature
    );

    Ok((
        StatusCode::CREATED,
        Json(SignedLinkResponse {
            url: signed.url,
            expires_at: signed.expires_at,
            signature: signed.signature,
            download_url,
        }),
    ))
}
