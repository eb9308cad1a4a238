//! Sandbox response formatting.

use bytes::Bytes;
use http_body_util::Full;
use paysign_auth::{AuthError, VerifiedRequest};
use serde_json::{Value, json};

/// Content type for sandbox JSON responses.
pub const CONTENT_TYPE: &str = "application/json";

/// Header carrying the per-request correlation id.
pub const CORRELATION_ID_HEADER: &str = "v-c-correlation-id";

/// Build a JSON response with the given status.
#[must_use]
pub fn json_response(
    status: http::StatusCode,
    body: &Value,
    correlation_id: &str,
) -> http::Response<Full<Bytes>> {
    let mut response = http::Response::new(Full::new(Bytes::from(body.to_string())));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static(CONTENT_TYPE),
    );
    if let Ok(hv) = http::HeaderValue::from_str(correlation_id) {
        headers.insert(CORRELATION_ID_HEADER, hv);
    }

    response
}

/// The `200` response for a request whose signature verified.
///
/// ```json
/// {"status":"AUTHORIZED","keyId":"...","merchantId":"...","method":"POST","resource":"/ipl/v2/payment-links"}
/// ```
#[must_use]
pub fn authorized_response(
    verified: &VerifiedRequest,
    correlation_id: &str,
) -> http::Response<Full<Bytes>> {
    json_response(
        http::StatusCode::OK,
        &json!({
            "status": "AUTHORIZED",
            "keyId": verified.key_id,
            "merchantId": verified.merchant_id,
            "method": verified.method.as_upper(),
            "resource": verified.resource,
        }),
        correlation_id,
    )
}

/// Convert a verification failure into a response.
///
/// Methods outside GET, POST and PATCH answer `405`; every other failure
/// answers `401`.
#[must_use]
pub fn auth_error_to_response(
    error: &AuthError,
    correlation_id: &str,
) -> http::Response<Full<Bytes>> {
    let (status, label) = match error {
        AuthError::InvalidMethod(_) => {
            (http::StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED")
        }
        _ => (http::StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
    };
    json_response(
        status,
        &json!({ "status": label, "reason": error.to_string() }),
        correlation_id,
    )
}

/// The `400` response for a body that could not be read.
#[must_use]
pub fn bad_request_response(
    reason: &str,
    correlation_id: &str,
) -> http::Response<Full<Bytes>> {
    json_response(
        http::StatusCode::BAD_REQUEST,
        &json!({ "status": "BAD_REQUEST", "reason": reason }),
        correlation_id,
    )
}
