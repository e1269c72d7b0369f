//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use arkiva_core::models;

/// Returns the OpenAPI spec served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Arkiva API",
        version = "0.1.0",
        description = "Document file service (v0). Files live in an object store; the service issues signed, time-limited download links and derives thumbnails from bucket notifications. All endpoints are versioned under /api/v0/."
    ),
    paths(
        // Storage notifications
        handlers::storage_hook::probe_hook,
        handlers::storage_hook::receive_hook,
        // Files
        handlers::file_link::issue_download_link,
        handlers::file_download::download_file,
    ),
    components(
        schemas(
            // Core models
            models::file::FileKind,
            models::file::FileResponse,
            // Handler payloads
            handlers::storage_hook::HookAck,
            handlers::file_link::SignedLinkResponse,
            // Error
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "storage", description = "Object store notification intake"),
        (name = "files", description = "Signed download links and file delivery")
    )
)]
pub struct ApiDoc;
