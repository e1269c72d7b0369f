//! Serving file bytes against a signed link.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Response;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use arkiva_core::{verify_download_url, AppError};

use crate::error::HttpAppError;
use crate::handlers::request_origin;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub expires: Option<i64>,
    pub signature: Option<String>,
}

/// Serve a file's bytes if the presented link verifies.
///
/// The signature is recomputed from the requested URL, so a link issued for
/// one host or file does not open any other. Expiry is checked before the
/// signature.
#[utoipa::path(
    get,
    path = "/api/v0/files/{id}/download",
    tag = "files",
    params(
        ("id" = Uuid, Path, description = "File identifier"),
        ("expires" = i64, Query, description = "Expiry timestamp from the issued link"),
        ("signature" = String, Query, description = "Signature from the issued link")
    ),
    responses(
        (status = 200, description = "File content", content_type = "application/octet-stream"),
        (status = 400, description = "Missing link parameters", body = crate::error::ErrorResponse),
        (status = 403, description = "Link expired or signature mismatch", body = crate::error::ErrorResponse),
        (status = 404, description = "File not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Catalog or storage failure", body = crate::error::ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, headers, query), fields(file_id = %id, operation = "download_file"))]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<DownloadQuery>,
    headers: HeaderMap,
) -> Result<Response, HttpAppError> {
    let expires = query
        .expires
        .ok_or_else(|| AppError::InvalidInput("Missing expires parameter".to_string()))?;
    let signature = query
        .signature
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Missing signature parameter".to_string()))?;

    let (scheme, host) = request_origin(&headers);
    verify_download_url(
        id,
        &host,
        &scheme,
        expires,
        &state.config.base.secret_key,
        Utc::now(),
        signature,
    )
    .map_err(AppError::from)?;

    let record = state
        .catalog
        .get(id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Catalog error fetching file for download");
            AppError::Internal(format!("Catalog error: {}", e))
        })?
        .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

    let data = state.store.get(&record.object_key()).await?;

    tracing::info!(size_bytes = data.len(), "Serving verified download");

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, record.content_type.as_str())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", record.name),
        )
        .header(header::CACHE_CONTROL, "private, max-age=3600")
        .body(Body::from(data))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError::from(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}
