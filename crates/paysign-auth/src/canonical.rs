//! Canonical signature string construction.
//!
//! The signature string has the following lines, in this order, joined by
//! `\n` with no trailing newline:
//!
//! ```text
//! host: <host>
//! v-c-date: <RFC 1123 date>
//! request-target: <lower-case method> <resource path>
//! digest: SHA-256=<digest>        (POST and PATCH only)
//! v-c-merchant-id: <merchant id>
//! ```
//!
//! Whether the digest line appears depends only on the method, never on
//! whether the body happens to be empty.

use crate::digest::DIGEST_PREFIX;
use crate::error::AuthError;
use crate::method::HttpMethod;

/// Build the canonical signature string.
///
/// `digest` is the base64 SHA-256 digest of the body, without the `SHA-256=`
/// prefix. It is ignored for GET and required for POST and PATCH; the digest
/// of an empty body is [`EMPTY_BODY_DIGEST`](crate::EMPTY_BODY_DIGEST). Other
/// inputs are not validated; an empty resource path is passed through
/// verbatim.
///
/// # Errors
///
/// Returns [`AuthError::MissingBody`] if a POST or PATCH has no digest.
///
/// # Examples
///
/// ```
/// use paysign_auth::HttpMethod;
/// use paysign_auth::canonical::build_signature_string;
///
/// let s = build_signature_string(
///     HttpMethod::Get,
///     "/ipl/v2/payment-links",
///     "apitest.cybersource.com",
///     "Wed, 01 Jan 2025 00:00:00 GMT",
///     "visa_acceptance_llm_01",
///     None,
/// )
/// .unwrap();
/// assert_eq!(s.lines().count(), 4);
/// assert!(s.starts_with("host: apitest.cybersource.com\n"));
/// ```
pub fn build_signature_string(
    method: HttpMethod,
    resource_path: &str,
    host: &str,
    date: &str,
    merchant_id: &str,
    digest: Option<&str>,
) -> Result<String, AuthError> {
    let mut lines = Vec::with_capacity(5);
    lines.push(format!("host: {host}"));
    lines.push(format!("v-c-date: {date}"));
    lines.push(format!(
        "request-target: {} {resource_path}",
        method.as_lower()
    ));
    if method.has_body() {
        let digest = digest.ok_or(AuthError::MissingBody(method.as_upper()))?;
        lines.push(format!("digest: {DIGEST_PREFIX}{digest}"));
    }
    lines.push(format!("v-c-merchant-id: {merchant_id}"));
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::compute_digest;

    const HOST: &str = "apitest.cybersource.com";
    const DATE: &str = "Wed, 01 Jan 2025 00:00:00 GMT";
    const MERCHANT: &str = "visa_acceptance_llm_01";

    #[test]
    fn test_should_build_get_signature_string_without_digest() {
        let s = build_signature_string(
            HttpMethod::Get,
            "/ipl/v2/payment-links",
            HOST,
            DATE,
            MERCHANT,
            None,
        )
        .unwrap();
        let expected = "host: apitest.cybersource.com\n\
                        v-c-date: Wed, 01 Jan 2025 00:00:00 GMT\n\
                        request-target: get /ipl/v2/payment-links\n\
                        v-c-merchant-id: visa_acceptance_llm_01";
        assert_eq!(s, expected);
        assert!(!s.contains("digest:"));
    }

    #[test]
    fn test_should_ignore_digest_for_get() {
        let s = build_signature_string(
            HttpMethod::Get,
            "/ipl/v2/payment-links",
            HOST,
            DATE,
            MERCHANT,
            Some("ignored"),
        )
        .unwrap();
        assert_eq!(s.lines().count(), 4);
        assert!(!s.contains("digest:"));
    }

    #[test]
    fn test_should_build_post_signature_string_with_digest_in_fourth_line() {
        let digest = compute_digest(br#"{"a":1}"#);
        let s = build_signature_string(
            HttpMethod::Post,
            "/ipl/v2/payment-links",
            HOST,
            DATE,
            MERCHANT,
            Some(&digest),
        )
        .unwrap();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], "request-target: post /ipl/v2/payment-links");
        assert_eq!(lines[3], format!("digest: SHA-256={digest}"));
        assert_eq!(lines[4], "v-c-merchant-id: visa_acceptance_llm_01");
    }

    #[test]
    fn test_should_reject_patch_without_digest() {
        let result = build_signature_string(
            HttpMethod::Patch,
            "/ipl/v2/payment-links/123",
            HOST,
            DATE,
            MERCHANT,
            None,
        );
        assert!(matches!(result, Err(AuthError::MissingBody("PATCH"))));
    }

    #[test]
    fn test_should_sign_empty_body_digest_for_patch() {
        let s = build_signature_string(
            HttpMethod::Patch,
            "/ipl/v2/payment-links/123",
            HOST,
            DATE,
            MERCHANT,
            Some(&compute_digest(b"")),
        )
        .unwrap();
        assert_eq!(s.lines().count(), 5);
        assert!(s.contains("digest: SHA-256=47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=\n"));
        assert!(s.contains("request-target: patch /ipl/v2/payment-links/123\n"));
    }

    #[test]
    fn test_should_pass_empty_resource_path_through() {
        let s = build_signature_string(HttpMethod::Get, "", HOST, DATE, MERCHANT, None).unwrap();
        assert!(s.contains("\nrequest-target: get \n"));
    }

    #[test]
    fn test_should_not_end_with_newline() {
        let s = build_signature_string(HttpMethod::Post, "/x", HOST, DATE, MERCHANT, Some("d"))
            .unwrap();
        assert!(!s.ends_with('\n'));
    }
}
