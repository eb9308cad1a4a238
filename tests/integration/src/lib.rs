//! Integration tests for the PaySign client and sandbox.
//!
//! Each test starts its own sandbox on an ephemeral loopback port and talks to
//! it over real HTTP, so no external server is needed:
//!
//! ```text
//! cargo test -p paysign-integration
//! ```

use std::net::SocketAddr;
use std::sync::{Arc, Once};

use paysign_auth::{Credentials, SecretKey, StaticCredentialProvider};
use paysign_http::ApiClient;
use paysign_sandbox::{SandboxConfig, SandboxService};
use tokio::net::TcpListener;

static INIT: Once = Once::new();

/// Key id accepted by the test sandbox.
pub const TEST_KEY_ID: &str = "9809ebfb-e5ce-43af-8f2d-90f65770c4bc";
/// Shared secret accepted by the test sandbox.
pub const TEST_SECRET: &str = "K3UY4P0qRlca7fdjzRmVl0yBSefaXZ8OcDhMag9WDtk=";
/// Merchant id accepted by the test sandbox.
pub const TEST_MERCHANT: &str = "visa_acceptance_llm_01";
/// Host requests are signed for.
pub const TEST_HOST: &str = "apitest.cybersource.com";

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Credentials with the given secret and merchant, signed for [`TEST_HOST`].
#[must_use]
pub fn credentials(secret: &str, merchant_id: &str) -> Credentials {
    Credentials::new(
        TEST_KEY_ID,
        SecretKey::from_base64(secret).unwrap(),
        merchant_id,
        TEST_HOST,
    )
    .unwrap()
}

/// The credentials the test sandbox accepts.
#[must_use]
pub fn test_credentials() -> Credentials {
    credentials(TEST_SECRET, TEST_MERCHANT)
}

/// Start a sandbox on an ephemeral port and return its address.
///
/// The server runs until the test's runtime shuts down.
pub async fn start_sandbox() -> SocketAddr {
    init_tracing();

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let addr = listener.local_addr().expect("listener has a local address");

    let service = SandboxService::new(SandboxConfig {
        credential_provider: Arc::new(StaticCredentialProvider::new(vec![test_credentials()])),
    });
    tokio::spawn(paysign_sandbox::serve(
        listener,
        service,
        std::future::pending(),
    ));

    addr
}

/// Base URL of a sandbox.
#[must_use]
pub fn base_url(addr: SocketAddr) -> String {
    format!("http://{addr}")
}

/// An API client that sends to the sandbox at `addr`.
#[must_use]
pub fn sandbox_client(addr: SocketAddr, credentials: Credentials) -> ApiClient {
    ApiClient::new(credentials, base_url(addr)).expect("failed to build client")
}

mod test_authorized;
mod test_rejected;
