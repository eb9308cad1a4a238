//! SHA-256 body digests.
//!
//! The digest is sent twice on a body-carrying request: once in the `digest`
//! header and once inside the canonical signature string. Both copies must be
//! derived from the exact bytes put on the wire.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use sha2::{Digest, Sha256};

/// Base64 SHA-256 digest of the empty body.
pub const EMPTY_BODY_DIGEST: &str = "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=";

/// Prefix of the `digest` header value.
pub const DIGEST_PREFIX: &str = "SHA-256=";

/// Compute the base64-encoded SHA-256 digest of a request body.
///
/// # Examples
///
/// ```
/// use paysign_auth::digest::{EMPTY_BODY_DIGEST, compute_digest};
///
/// assert_eq!(compute_digest(b""), EMPTY_BODY_DIGEST);
/// ```
#[must_use]
pub fn compute_digest(body: &[u8]) -> String {
    BASE64.encode(Sha256::digest(body))
}

/// Compute the `digest` header value (`SHA-256=<base64>`) for a request body.
#[must_use]
pub fn digest_header_value(body: &[u8]) -> String {
    format!("{DIGEST_PREFIX}{}", compute_digest(body))
}
