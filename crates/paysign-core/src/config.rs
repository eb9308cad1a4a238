//! Configuration management for PaySign.
//!
//! All configuration is driven by environment variables using the
//! `VISA_ACCEPTANCE_*` names the payment toolkits document.

use std::fmt;

use tracing::warn;

use crate::error::PaySignResult;
use crate::types::ApiEnvironment;

/// Global configuration for PaySign.
///
/// Credentials are kept as the raw strings found in the environment. Decoding
/// and validating them is the job of `paysign_auth::Credentials`, which is
/// built from this value once at startup.
#[derive(Clone)]
pub struct PaySignConfig {
    /// Merchant identifier sent as `v-c-merchant-id`.
    pub merchant_id: String,
    /// Identifier of the shared signing key.
    pub api_key_id: String,
    /// Base64-encoded shared secret.
    pub secret_key: String,
    /// Payment API environment.
    pub environment: ApiEnvironment,
    /// Explicit request host, overriding the environment's host.
    pub request_host: Option<String>,
    /// Bind address for the local sandbox.
    pub sandbox_listen: String,
    /// Log level.
    pub log_level: String,
}

impl Default for PaySignConfig {
    fn default() -> Self {
        Self {
            merchant_id: String::new(),
            api_key_id: String::new(),
            secret_key: String::new(),
            environment: ApiEnvironment::default(),
            request_host: None,
            sandbox_listen: "127.0.0.1:8443".to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl fmt::Debug for PaySignConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaySignConfig")
            .field("merchant_id", &self.merchant_id)
            .field("api_key_id", &self.api_key_id)
            .field("secret_key", &"<redacted>")
            .field("environment", &self.environment)
            .field("request_host", &self.request_host)
            .field("sandbox_listen", &self.sandbox_listen)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl PaySignConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`PaySignError::UnknownEnvironment`](crate::PaySignError::UnknownEnvironment) if
    /// `VISA_ACCEPTANCE_ENVIRONMENT` names neither `SANDBOX` nor `PRODUCTION`.
    pub fn from_env() -> PaySignResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unset and empty variables both leave the default in place.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PaySignResult<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(v) = var("VISA_ACCEPTANCE_MERCHANT_ID") {
            config.merchant_id = v;
        }
        if let Some(v) = var("VISA_ACCEPTANCE_API_KEY_ID") {
            config.api_key_id = v;
        }
        if let Some(v) = var("VISA_ACCEPTANCE_SECRET_KEY") {
            config.secret_key = v;
        }
        if let Some(v) = var("VISA_ACCEPTANCE_ENVIRONMENT") {
            config.environment = v.parse()?;
        }
        if let Some(v) = var("VISA_ACCEPTANCE_REQUEST_HOST") {
            config.request_host = Some(v);
        }
        if let Some(v) = var("SANDBOX_LISTEN") {
            config.sandbox_listen = v;
        }
        if let Some(v) = var("LOG_LEVEL") {
            config.log_level = v;
        }

        if config.merchant_id.is_empty() {
            warn!("VISA_ACCEPTANCE_MERCHANT_ID is not set");
        }

        Ok(config)
    }

    /// The host requests are signed for and sent to.
    #[must_use]
    pub fn request_host(&self) -> &str {
        self.request_host
            .as_deref()
            .unwrap_or_else(|| self.environment.host())
    }
}
