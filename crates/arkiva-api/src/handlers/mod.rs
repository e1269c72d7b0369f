//! HTTP request handlers.

pub mod file_download;
pub mod file_link;
pub mod storage_hook;

use axum::http::{header, HeaderMap};

/// Resolve the scheme and host the client used, honoring proxy headers.
///
/// Signing and verification must see the same origin for a link to round
/// trip, so both handlers go through this one resolution.
pub(crate) fn request_origin(headers: &HeaderMap) -> (String, String) {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("http")
        .to_string();

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("localhost")
        .to_string();

    (scheme, host)
}
