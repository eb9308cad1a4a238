//! PaySign Sandbox Server - local verifier for signed payment API requests.
//!
//! Every request is checked against the configured signing key. Correctly
//! signed requests are answered `200 AUTHORIZED`; everything else `401`.
//!
//! # Usage
//!
//! ```text
//! VISA_ACCEPTANCE_MERCHANT_ID=... \
//! VISA_ACCEPTANCE_API_KEY_ID=... \
//! VISA_ACCEPTANCE_SECRET_KEY=... \
//! SANDBOX_LISTEN=127.0.0.1:8443 paysign-sandbox-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `VISA_ACCEPTANCE_MERCHANT_ID` | *(required)* | Merchant id requests must carry |
//! | `VISA_ACCEPTANCE_API_KEY_ID` | *(required)* | Accepted signing key id |
//! | `VISA_ACCEPTANCE_SECRET_KEY` | *(required)* | Base64 shared secret |
//! | `VISA_ACCEPTANCE_ENVIRONMENT` | `SANDBOX` | Selects the expected `host` |
//! | `VISA_ACCEPTANCE_REQUEST_HOST` | *(environment host)* | Explicit expected `host` |
//! | `SANDBOX_LISTEN` | `127.0.0.1:8443` | Bind address |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use paysign_auth::{Credentials, StaticCredentialProvider};
use paysign_core::PaySignConfig;
use paysign_sandbox::{HEALTH_PATH, SandboxConfig, SandboxService};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Parse the configured bind address.
fn listen_addr(config: &PaySignConfig) -> Result<SocketAddr> {
    config
        .sandbox_listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.sandbox_listen))
}

/// Request the health endpoint of a running sandbox.
///
/// Succeeds if the response is `200 OK` and reports `UP`.
async fn run_health_check(addr: SocketAddr) -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;

    let (mut reader, mut writer) = stream.into_split();

    let request =
        format!("GET {HEALTH_PATH} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    writer.write_all(request.as_bytes()).await?;
    writer.shutdown().await?;

    let mut response = String::new();
    reader.read_to_string(&mut response).await?;

    if response.contains("200 OK") && response.contains("\"UP\"") {
        Ok(())
    } else {
        anyhow::bail!("unhealthy response from {addr}")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = PaySignConfig::from_env().context("failed to load configuration")?;
    let addr = listen_addr(&config)?;

    // --health-check exits with the health endpoint status.
    if std::env::args().any(|a| a == "--health-check") {
        let healthy = run_health_check(addr).await.is_ok();
        std::process::exit(i32::from(!healthy));
    }

    init_tracing(&config.log_level)?;

    let credentials =
        Credentials::from_config(&config).context("invalid signing credentials")?;
    info!(
        key_id = %credentials.key_id(),
        merchant_id = %credentials.merchant_id(),
        request_host = %credentials.request_host(),
        "configured credential provider from environment"
    );

    let service = SandboxService::new(SandboxConfig {
        credential_provider: Arc::new(StaticCredentialProvider::new(vec![credentials])),
    });

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, version = VERSION, "starting PaySign sandbox");

    paysign_sandbox::serve(listener, service, async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    })
    .await;

    Ok(())
}
