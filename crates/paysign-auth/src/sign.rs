//! Signing orchestration.
//!
//! [`compute_auth_signature`] ties the pieces together:
//!
//! 1. Generate the `v-c-date` value once.
//! 2. For POST and PATCH, digest the body once.
//! 3. Build the canonical signature string from the same date and digest.
//! 4. Sign it and assemble the `signature` header.
//!
//! The returned [`SignedHeaders`] carry the exact date and digest strings that
//! were signed, so the caller cannot send values that differ from them.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::canonical::build_signature_string;
use crate::credentials::Credentials;
use crate::digest::{DIGEST_PREFIX, compute_digest};
use crate::error::AuthError;
use crate::method::HttpMethod;
use crate::signer::{assemble_signature_header, sign_with_key};

/// Name of the header carrying the assembled signature.
pub const SIGNATURE_HEADER: &str = "signature";
/// Name of the header carrying the body digest.
pub const DIGEST_HEADER: &str = "digest";
/// Name of the header carrying the signing date.
pub const DATE_HEADER: &str = "v-c-date";
/// Name of the header carrying the merchant id.
pub const MERCHANT_ID_HEADER: &str = "v-c-merchant-id";

/// Headers produced by signing a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Value of the `signature` header.
    pub signature: String,
    /// Value of the `digest` header (`SHA-256=<base64>`); `None` for GET.
    pub digest: Option<String>,
    /// Value of the `v-c-date` header, identical to the signed date line.
    pub date: String,
    /// Value of the `host` header.
    pub host: String,
    /// Value of the `v-c-merchant-id` header.
    pub merchant_id: String,
}

impl SignedHeaders {
    /// Insert every signed header into a header map, replacing existing values.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidHeaderValue`] if a value contains bytes that
    /// are not allowed in an HTTP header.
    pub fn apply_to(&self, headers: &mut http::HeaderMap) -> Result<(), AuthError> {
        let mut insert = |name: &'static str, value: &str| -> Result<(), AuthError> {
            let value = http::HeaderValue::from_str(value)
                .map_err(|_| AuthError::InvalidHeaderValue(name))?;
            headers.insert(name, value);
            Ok(())
        };

        insert("host", &self.host)?;
        insert(DATE_HEADER, &self.date)?;
        if let Some(digest) = &self.digest {
            insert(DIGEST_HEADER, digest)?;
        }
        insert(MERCHANT_ID_HEADER, &self.merchant_id)?;
        insert(SIGNATURE_HEADER, &self.signature)?;
        Ok(())
    }
}

/// Format a timestamp as an RFC 1123 HTTP date.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use paysign_auth::http_date;
///
/// let ts = Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 0).unwrap();
/// assert_eq!(http_date(ts), "Wed, 21 Oct 2015 07:28:00 GMT");
/// ```
#[must_use]
pub fn http_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Sign a request at the current time.
///
/// `body` must be the exact bytes that will be transmitted. It is required
/// for POST and PATCH (an empty slice is a valid body) and ignored for GET.
///
/// # Errors
///
/// Returns [`AuthError::MissingBody`] if a POST or PATCH request has no body.
pub fn compute_auth_signature(
    credentials: &Credentials,
    method: HttpMethod,
    resource_path: &str,
    body: Option<&[u8]>,
) -> Result<SignedHeaders, AuthError> {
    compute_auth_signature_at(
        credentials,
        method,
        resource_path,
        body,
        &http_date(Utc::now()),
    )
}

/// Sign a request with an explicit `v-c-date` value.
///
/// # Errors
///
/// Returns [`AuthError::MissingBody`] if a POST or PATCH request has no body.
pub fn compute_auth_signature_at(
    credentials: &Credentials,
    method: HttpMethod,
    resource_path: &str,
    body: Option<&[u8]>,
    date: &str,
) -> Result<SignedHeaders, AuthError> {
    let digest = if method.has_body() {
        let body = body.ok_or(AuthError::MissingBody(method.as_upper()))?;
        Some(compute_digest(body))
    } else {
        None
    };

    let signature_string = build_signature_string(
        method,
        resource_path,
        credentials.request_host(),
        date,
        credentials.merchant_id(),
        digest.as_deref(),
    )?;

    let signature = sign_with_key(&signature_string, credentials.secret());

    debug!(
        key_id = %credentials.key_id(),
        method = %method,
        resource_path,
        date,
        "Signed request"
    );

    Ok(SignedHeaders {
        signature: assemble_signature_header(credentials.key_id(), method, &signature),
        digest: digest.map(|d| format!("{DIGEST_PREFIX}{d}")),
        date: date.to_owned(),
        host: credentials.request_host().to_owned(),
        merchant_id: credentials.merchant_id().to_owned(),
    })
}
