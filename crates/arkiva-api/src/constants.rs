//! API constants
//!
//! Route prefix and request limits shared by the router and handlers.

/// API base path prefix, including the version segment.
pub const API_PREFIX: &str = "/api/v0";

/// Upper bound on inbound request bodies. Notifications and link requests are
/// small JSON documents; file bytes never travel through this API.
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;
