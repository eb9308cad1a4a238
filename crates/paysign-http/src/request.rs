//! Building signed requests.

use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use paysign_auth::{AuthError, Credentials, compute_auth_signature};
use tracing::debug;

use crate::error::HttpError;
use crate::operation::Operation;

/// `content-type` sent with every request.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";
/// `accept` sent with every request.
pub const ACCEPT_VALUE: &str = "application/hal+json;charset=utf-8";
/// `user-agent` sent with every request.
pub const USER_AGENT_VALUE: &str = concat!("paysign/", env!("CARGO_PKG_VERSION"));

/// Build a fully signed request for `operation`.
///
/// `base_url` is the scheme and authority the request is sent to, for example
/// `https://apitest.cybersource.com`. It must not carry a path, because the
/// signed request target has to equal the path the server receives. The
/// `host` header always comes from the credentials, so a request can be
/// routed to a local endpoint while still being signed for the real host.
///
/// The JSON body is serialized exactly once. The same buffer is hashed for
/// the `digest` header and installed as the request body. Send and cancel
/// operations without a body transmit an empty body; the other POST and PATCH
/// operations require one.
///
/// # Errors
///
/// - [`HttpError::Auth`] wrapping [`AuthError::MissingBody`] if a required
///   body is absent
/// - [`HttpError::Serialize`] if the body cannot be serialized
/// - [`HttpError::InvalidRequest`] if `base_url` is not a bare origin
pub fn build_signed_request(
    credentials: &Credentials,
    base_url: &str,
    operation: &Operation,
    body: Option<&serde_json::Value>,
) -> Result<http::Request<Bytes>, HttpError> {
    let method = operation.method();
    let resource = operation.resource();

    let payload = if method.has_body() {
        match body {
            Some(value) => Bytes::from(serde_json::to_vec(value).map_err(HttpError::Serialize)?),
            None if operation.requires_body() => {
                return Err(AuthError::MissingBody(method.as_upper()).into());
            }
            None => Bytes::new(),
        }
    } else {
        if body.is_some() {
            debug!(operation = operation.name(), "Ignoring body for GET request");
        }
        Bytes::new()
    };

    let uri = request_uri(base_url, &resource)?;
    let signed = compute_auth_signature(
        credentials,
        method,
        &resource,
        method.has_body().then_some(&payload[..]),
    )?;

    let mut request = http::Request::builder()
        .method(http::Method::from(method))
        .uri(uri)
        .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
        .header(ACCEPT, ACCEPT_VALUE)
        .header(USER_AGENT, USER_AGENT_VALUE)
        .body(payload)?;
    signed.apply_to(request.headers_mut())?;

    debug!(
        operation = operation.name(),
        method = %method,
        resource,
        "Built signed request"
    );

    Ok(request)
}

/// Join a bare origin and a request target into a URI.
fn request_uri(base_url: &str, resource: &str) -> Result<http::Uri, HttpError> {
    let base: http::Uri = base_url
        .parse()
        .map_err(|e| HttpError::InvalidRequest(format!("invalid base url {base_url:?}: {e}")))?;
    let (Some(scheme), Some(authority)) = (base.scheme_str(), base.authority()) else {
        return Err(HttpError::InvalidRequest(format!(
            "base url {base_url:?} must include a scheme and host"
        )));
    };
    if !matches!(base.path(), "" | "/") || base.query().is_some() {
        return Err(HttpError::InvalidRequest(format!(
            "base url {base_url:?} must not include a path"
        )));
    }
    format!("{scheme}://{authority}{resource}")
        .parse()
        .map_err(|e| HttpError::InvalidRequest(format!("invalid request uri: {e}")))
}
