//! Signed download links for file access (no auth).
//!
//! Signature = base64url_nopad( SHAKE-256_32( full_url || expires_at || secret ) ),
//! where `full_url = {scheme}://{host}{download_path}` with exactly one slash
//! between host and path regardless of how the host was supplied.
//!
//! Signing and verification are pure: identical inputs (including `now`)
//! always produce identical output. The secret never appears in logs.

use base64::Engine;
use chrono::{DateTime, Utc};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

const SIGNATURE_BYTES: usize = 32;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("download link expired")]
    Expired,

    #[error("download link signature mismatch")]
    Mismatch,
}

impl From<SignatureError> for crate::error::AppError {
    fn from(err: SignatureError) -> Self {
        match err {
            SignatureError::Expired => crate::error::AppError::LinkExpired,
            SignatureError::Mismatch => crate::error::AppError::SignatureMismatch,
        }
    }
}

/// A freshly signed download link. Never persisted; verification recomputes
/// everything from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrl {
    pub url: String,
    pub expires_at: i64,
    pub signature: String,
}

/// Resolve the download route for a file.
///
/// This is part of the wire contract: the signature covers the full URL, so
/// issuance and verification must resolve the identical path.
pub fn download_path(file_id: Uuid) -> String {
    format!("/api/v0/files/{}/download", file_id)
}

/// Sign a download link for `file_id`, valid for `ttl_secs` from `now`.
pub fn sign_download_url(
    file_id: Uuid,
    host: &str,
    scheme: &str,
    ttl_secs: i64,
    secret: &str,
    now: DateTime<Utc>,
) -> SignedUrl {
    let url = full_url(scheme, host, &download_path(file_id));
    let expires_at = now.timestamp() + ttl_secs;
    let signature = compute_signature(&url, expires_at, secret);
    SignedUrl {
        url,
        expires_at,
        signature,
    }
}

/// Verify a download link reconstructed from an incoming request.
///
/// The expiry is the one the client presented, not a recomputed one. Expiry
/// is checked first, so an expired link reports `Expired` no matter what its
/// signature looks like. The signature comparison is constant-time.
pub fn verify_download_url(
    file_id: Uuid,
    host: &str,
    scheme: &str,
    expires_at: i64,
    secret: &str,
    now: DateTime<Utc>,
    candidate_signature: &str,
) -> Result<(), SignatureError> {
    if now.timestamp() > expires_at {
        return Err(SignatureError::Expired);
    }

    let url = full_url(scheme, host, &download_path(file_id));
    let expected = compute_signature(&url, expires_at, secret);
    if expected
        .as_bytes()
        .ct_eq(candidate_signature.as_bytes())
        .into()
    {
        Ok(())
    } else {
        Err(SignatureError::Mismatch)
    }
}

fn compute_signature(url: &str, expires_at: i64, secret: &str) -> String {
    let mut hasher = Shake256::default();
    hasher.update(url.as_bytes());
    hasher.update(expires_at.to_string().as_bytes());
    hasher.update(secret.as_bytes());

    let mut digest = [0u8; SIGNATURE_BYTES];
    hasher.finalize_xof().read(&mut digest);
    base64_url_encode(&digest)
}

fn full_url(scheme: &str, host: &str, path: &str) -> String {
    format!("{}://{}{}", scheme, host.trim_matches('/'), path)
}

fn base64_url_encode(data: &[u8]) -> String {
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(data)
}
