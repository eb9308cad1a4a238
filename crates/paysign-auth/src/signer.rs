//! HMAC signing and `signature` header assembly.
//!
//! The signature is `Base64(HMAC-SHA256(secret, signature_string))`, where the
//! secret is the base64-decoded shared key. The header transmitted on the
//! wire has the format:
//!
//! ```text
//! keyid="<key id>", algorithm="HmacSHA256", headers="<header list>", signature="<signature>"
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, KeyInit, Mac};
use sha2::Sha256;

use crate::credentials::SecretKey;
use crate::error::AuthError;
use crate::method::HttpMethod;

/// The only algorithm name carried in the `signature` header.
pub const SIGNATURE_ALGORITHM: &str = "HmacSHA256";

type HmacSha256 = Hmac<Sha256>;

/// Sign a canonical signature string with a base64-encoded shared secret.
///
/// # Errors
///
/// Returns [`AuthError::MalformedSecret`] if `secret_base64` is not valid
/// base64, rather than signing with garbage key bytes.
///
/// # Examples
///
/// ```
/// use paysign_auth::signer::sign;
///
/// let signature = sign("host: example.com", "c2VjcmV0").unwrap();
/// assert_eq!(signature.len(), 44);
/// assert!(sign("host: example.com", "***").is_err());
/// ```
pub fn sign(canonical: &str, secret_base64: &str) -> Result<String, AuthError> {
    let key = SecretKey::from_base64(secret_base64)?;
    Ok(sign_with_key(canonical, &key))
}

/// Sign a canonical signature string with an already-decoded shared secret.
#[must_use]
pub fn sign_with_key(canonical: &str, key: &SecretKey) -> String {
    BASE64.encode(hmac_sha256(key.as_bytes(), canonical.as_bytes()))
}

/// Assemble the `signature` header value.
///
/// The header list is chosen from the method. Values are not escaped; a key
/// id containing `"` produces a malformed header.
///
/// # Examples
///
/// ```
/// use paysign_auth::HttpMethod;
/// use paysign_auth::signer::assemble_signature_header;
///
/// let header = assemble_signature_header("key-1", HttpMethod::Get, "c2ln");
/// assert_eq!(
///     header,
///     r#"keyid="key-1", algorithm="HmacSHA256", headers="host v-c-date request-target v-c-merchant-id", signature="c2ln""#
/// );
/// ```
#[must_use]
pub fn assemble_signature_header(key_id: &str, method: HttpMethod, signature: &str) -> String {
    format!(
        "keyid=\"{key_id}\", algorithm=\"{SIGNATURE_ALGORITHM}\", headers=\"{}\", signature=\"{signature}\"",
        method.signed_header_list()
    )
}

/// Compute HMAC-SHA256 and return the raw bytes.
fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can accept keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
