//! Sandbox HTTP service implementing the hyper `Service` trait.

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use paysign_auth::{CredentialProvider, verify_request};
use serde_json::json;
use tracing::{debug, info};

use crate::response::{
    auth_error_to_response, authorized_response, bad_request_response, json_response,
};

/// Path answered without authentication.
pub const HEALTH_PATH: &str = "/health";

/// Configuration for the sandbox service.
#[derive(Clone)]
pub struct SandboxConfig {
    /// Keys requests are verified against.
    pub credential_provider: Arc<dyn CredentialProvider>,
}

impl fmt::Debug for SandboxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SandboxConfig")
            .field("credential_provider", &"...")
            .finish()
    }
}

/// Hyper `Service` that verifies the signature of every request.
///
/// The sandbox has no business logic: a correctly signed request to any path
/// is answered `200 AUTHORIZED`, echoing what was verified.
#[derive(Debug, Clone)]
pub struct SandboxService {
    config: Arc<SandboxConfig>,
}

impl SandboxService {
    /// Create a new `SandboxService`.
    pub fn new(config: SandboxConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl hyper::service::Service<http::Request<Incoming>> for SandboxService {
    type Response = http::Response<Full<Bytes>>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let config = Arc::clone(&self.config);
        let correlation_id = uuid::Uuid::new_v4().to_string();

        Box::pin(async move {
            let response = process_request(req, &config, &correlation_id).await;
            Ok(add_common_headers(response))
        })
    }
}

/// Process a single request: health check, body collection, verification.
pub async fn process_request<B>(
    req: http::Request<B>,
    config: &SandboxConfig,
    correlation_id: &str,
) -> http::Response<Full<Bytes>>
where
    B: http_body::Body<Data = Bytes>,
    B::Error: fmt::Display,
{
    let (parts, body) = req.into_parts();

    if parts.method == http::Method::GET && parts.uri.path() == HEALTH_PATH {
        return json_response(http::StatusCode::OK, &json!({ "status": "UP" }), correlation_id);
    }

    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            debug!(correlation_id, error = %e, "Failed to read request body");
            let reason = format!("failed to read request body: {e}");
            return bad_request_response(&reason, correlation_id);
        }
    };

    match verify_request(&parts, &body, config.credential_provider.as_ref()) {
        Ok(verified) => {
            info!(
                correlation_id,
                key_id = %verified.key_id,
                method = %verified.method,
                resource = %verified.resource,
                "Request authorized"
            );
            authorized_response(&verified, correlation_id)
        }
        Err(err) => {
            info!(
                correlation_id,
                method = %parts.method,
                path = parts.uri.path(),
                reason = %err,
                "Request rejected"
            );
            auth_error_to_response(&err, correlation_id)
        }
    }
}

/// Add headers common to every sandbox response.
fn add_common_headers(
    mut response: http::Response<Full<Bytes>>,
) -> http::Response<Full<Bytes>> {
    response
        .headers_mut()
        .insert("server", http::HeaderValue::from_static("PaySign-Sandbox"));
    response
}
