//! Inbound HTTP signature verification.
//!
//! This is the server side of the scheme in [`crate::sign`]:
//!
//! 1. Parse the `signature` header into key id, algorithm, header list and
//!    signature value.
//! 2. Check the header list is exactly the one the request method requires.
//! 3. Resolve the key id via the credential provider and check the merchant
//!    id and host belong to it.
//! 4. For POST and PATCH, recompute the body digest and compare it with the
//!    `digest` header.
//! 5. Rebuild the canonical signature string from the received headers and
//!    compare the expected signature using constant-time comparison.

use subtle::ConstantTimeEq;
use tracing::debug;

use crate::canonical::build_signature_string;
use crate::credentials::CredentialProvider;
use crate::digest::{DIGEST_PREFIX, digest_header_value};
use crate::error::AuthError;
use crate::method::HttpMethod;
use crate::sign::{DATE_HEADER, DIGEST_HEADER, MERCHANT_ID_HEADER, SIGNATURE_HEADER};
use crate::signer::{SIGNATURE_ALGORITHM, sign_with_key};

/// Parsed components of a `signature` header.
///
/// Format:
/// ```text
/// keyid="<key id>", algorithm="HmacSHA256",
///   headers="host v-c-date request-target v-c-merchant-id",
///   signature="<base64 signature>"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSignature {
    /// The signing key id.
    pub key_id: String,
    /// The signing algorithm (must be `HmacSHA256`).
    pub algorithm: String,
    /// The space-separated list of signed headers.
    pub headers: String,
    /// The base64-encoded signature.
    pub signature: String,
}

/// The result of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedRequest {
    /// The key id that signed the request.
    pub key_id: String,
    /// The merchant the key belongs to.
    pub merchant_id: String,
    /// The request method.
    pub method: HttpMethod,
    /// The signed request target (path and query).
    pub resource: String,
}

/// Parse a `signature` header value into its components.
///
/// # Errors
///
/// Returns [`AuthError::InvalidSignatureHeader`] if a field is missing or not
/// quoted, or [`AuthError::UnsupportedAlgorithm`] if the algorithm is not
/// `HmacSHA256`.
pub fn parse_signature_header(header: &str) -> Result<ParsedSignature, AuthError> {
    let mut key_id = None;
    let mut algorithm = None;
    let mut headers = None;
    let mut signature = None;

    for part in header.split(',') {
        let (name, value) = part
            .trim()
            .split_once('=')
            .ok_or(AuthError::InvalidSignatureHeader)?;
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .ok_or(AuthError::InvalidSignatureHeader)?;

        match name {
            "keyid" => key_id = Some(value),
            "algorithm" => algorithm = Some(value),
            "headers" => headers = Some(value),
            "signature" => signature = Some(value),
            _ => {}
        }
    }

    let key_id = key_id
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::InvalidSignatureHeader)?;
    let algorithm = algorithm.ok_or(AuthError::InvalidSignatureHeader)?;
    let headers = headers.ok_or(AuthError::InvalidSignatureHeader)?;
    let signature = signature
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::InvalidSignatureHeader)?;

    if algorithm != SIGNATURE_ALGORITHM {
        return Err(AuthError::UnsupportedAlgorithm(algorithm.to_owned()));
    }

    Ok(ParsedSignature {
        key_id: key_id.to_owned(),
        algorithm: algorithm.to_owned(),
        headers: headers.to_owned(),
        signature: signature.to_owned(),
    })
}

/// Verify an HTTP-signature-signed request.
///
/// `body` must be the complete received body.
///
/// # Errors
///
/// Returns an [`AuthError`] if:
/// - The `signature` header is missing or malformed
/// - The method is not GET, POST or PATCH
/// - The key id is not found, or the merchant id or host does not belong to it
/// - A signed header is missing
/// - The `digest` header does not match the body
/// - The signature does not match
pub fn verify_request(
    parts: &http::request::Parts,
    body: &[u8],
    credential_provider: &dyn CredentialProvider,
) -> Result<VerifiedRequest, AuthError> {
    let header = parts
        .headers
        .get(SIGNATURE_HEADER)
        .ok_or(AuthError::MissingSignatureHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidSignatureHeader)?;

    let parsed = parse_signature_header(header)?;
    let method = HttpMethod::try_from(&parts.method)?;

    if parsed.headers != method.signed_header_list() {
        return Err(AuthError::UnexpectedHeaderList(parsed.headers));
    }

    let credentials = credential_provider.get_credentials(&parsed.key_id)?;

    let merchant_id = extract_header_value(parts, MERCHANT_ID_HEADER)?;
    if merchant_id != credentials.merchant_id() {
        return Err(AuthError::MerchantMismatch(merchant_id.to_owned()));
    }

    let host = extract_host(parts)?;
    if !host.eq_ignore_ascii_case(credentials.request_host()) {
        return Err(AuthError::HostMismatch(host.to_owned()));
    }

    let date = extract_header_value(parts, DATE_HEADER)?;
    let resource = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path(), http::uri::PathAndQuery::as_str);

    let digest = if method.has_body() {
        let provided = extract_header_value(parts, DIGEST_HEADER)?;
        let expected = digest_header_value(body);
        if !bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
            debug!(key_id = %parsed.key_id, "Digest mismatch");
            return Err(AuthError::DigestMismatch);
        }
        expected
            .strip_prefix(DIGEST_PREFIX)
            .map(ToOwned::to_owned)
    } else {
        None
    };

    debug!(
        key_id = %parsed.key_id,
        method = %method,
        resource,
        "Verifying request signature"
    );

    let signature_string =
        build_signature_string(method, resource, host, date, merchant_id, digest.as_deref())?;
    let expected_signature = sign_with_key(&signature_string, credentials.secret());

    if parsed
        .signature
        .as_bytes()
        .ct_eq(expected_signature.as_bytes())
        .into()
    {
        debug!(key_id = %parsed.key_id, "Signature verification succeeded");
        Ok(VerifiedRequest {
            key_id: parsed.key_id,
            merchant_id: merchant_id.to_owned(),
            method,
            resource: resource.to_owned(),
        })
    } else {
        debug!(key_id = %parsed.key_id, "Signature mismatch");
        Err(AuthError::SignatureDoesNotMatch)
    }
}

/// The request host: the `host` header, or the URI authority when the
/// header is absent (HTTP/2 carries it as `:authority`).
fn extract_host(parts: &http::request::Parts) -> Result<&str, AuthError> {
    match parts.headers.get(http::header::HOST) {
        Some(_) => extract_header_value(parts, "host"),
        None => parts
            .uri
            .authority()
            .map(http::uri::Authority::as_str)
            .ok_or_else(|| AuthError::MissingHeader("host".to_owned())),
    }
}

/// Extract a header value as a string from the request parts.
fn extract_header_value<'a>(
    parts: &'a http::request::Parts,
    name: &str,
) -> Result<&'a str, AuthError> {
    parts
        .headers
        .get(name)
        .ok_or_else(|| AuthError::MissingHeader(name.to_owned()))?
        .to_str()
        .map_err(|_| AuthError::MissingHeader(name.to_owned()))
}
