//! Signing credentials and the verification key store.
//!
//! [`Credentials`] is the immutable value every signing call receives. It is
//! built once at startup, usually from [`PaySignConfig`], and passed by
//! reference; the signer never reads the process environment itself.
//!
//! [`CredentialProvider`] is the lookup used on the verification side to
//! resolve a `keyid` to the credentials it belongs to.

use std::collections::HashMap;
use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use paysign_core::PaySignConfig;

use crate::error::AuthError;

/// A decoded shared secret.
///
/// The only way to build one is [`SecretKey::from_base64`], so holding a
/// `SecretKey` means the configured secret was valid base64.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Decode a base64 (standard alphabet, padded) shared secret.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredential`] for an empty string and
    /// [`AuthError::MalformedSecret`] if the input is not valid base64.
    ///
    /// # Examples
    ///
    /// ```
    /// use paysign_auth::SecretKey;
    ///
    /// let key = SecretKey::from_base64("K3UY4P0qRlca7fdjzRmVl0yBSefaXZ8OcDhMag9WDtk=").unwrap();
    /// assert_eq!(key.len(), 32);
    /// assert!(SecretKey::from_base64("not base64!").is_err());
    /// ```
    pub fn from_base64(encoded: &str) -> Result<Self, AuthError> {
        if encoded.is_empty() {
            return Err(AuthError::MissingCredential("secret_key"));
        }
        let bytes = BASE64
            .decode(encoded)
            .map_err(|_| AuthError::MalformedSecret)?;
        if bytes.is_empty() {
            return Err(AuthError::MalformedSecret);
        }
        Ok(Self(bytes))
    }

    /// Raw key bytes for the HMAC computation.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the decoded key in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a `SecretKey` cannot be empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(<{} bytes>)", self.0.len())
    }
}

/// The credentials used to sign outbound calls.
#[derive(Debug, Clone)]
pub struct Credentials {
    key_id: String,
    secret: SecretKey,
    merchant_id: String,
    request_host: String,
}

impl Credentials {
    /// Create credentials from already-validated parts.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredential`] if `key_id`, `merchant_id` or
    /// `request_host` is empty.
    pub fn new(
        key_id: impl Into<String>,
        secret: SecretKey,
        merchant_id: impl Into<String>,
        request_host: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let key_id = key_id.into();
        let merchant_id = merchant_id.into();
        let request_host = request_host.into();

        if key_id.is_empty() {
            return Err(AuthError::MissingCredential("key_id"));
        }
        if merchant_id.is_empty() {
            return Err(AuthError::MissingCredential("merchant_id"));
        }
        if request_host.is_empty() {
            return Err(AuthError::MissingCredential("request_host"));
        }

        Ok(Self {
            key_id,
            secret,
            merchant_id,
            request_host,
        })
    }

    /// Build credentials from process configuration.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error if a credential is missing or the
    /// secret is not valid base64.
    pub fn from_config(config: &PaySignConfig) -> Result<Self, AuthError> {
        Self::resolve(&CredentialOverrides::default(), config)
    }

    /// Resolve credentials through the fallback chain: per-call override,
    /// then process configuration, then the environment's default host.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error if a credential is missing or the
    /// secret is not valid base64.
    pub fn resolve(
        overrides: &CredentialOverrides,
        config: &PaySignConfig,
    ) -> Result<Self, AuthError> {
        let pick = |over: Option<&String>, configured: &str| {
            over.filter(|v| !v.is_empty())
                .map_or_else(|| configured.to_owned(), Clone::clone)
        };

        let secret = pick(overrides.secret_key.as_ref(), &config.secret_key);

        Self::new(
            pick(overrides.key_id.as_ref(), &config.api_key_id),
            SecretKey::from_base64(&secret)?,
            pick(overrides.merchant_id.as_ref(), &config.merchant_id),
            pick(overrides.request_host.as_ref(), config.request_host()),
        )
    }

    /// The signing key identifier.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// The decoded shared secret.
    #[must_use]
    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }

    /// The merchant identifier.
    #[must_use]
    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    /// The host requests are signed for.
    #[must_use]
    pub fn request_host(&self) -> &str {
        &self.request_host
    }
}

/// Optional per-call replacements for configured credential values.
///
/// Empty strings count as absent.
#[derive(Default, Clone)]
pub struct CredentialOverrides {
    /// Replacement signing key id.
    pub key_id: Option<String>,
    /// Replacement base64 shared secret.
    pub secret_key: Option<String>,
    /// Replacement merchant id.
    pub merchant_id: Option<String>,
    /// Replacement request host.
    pub request_host: Option<String>,
}

impl fmt::Debug for CredentialOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialOverrides")
            .field("key_id", &self.key_id)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("merchant_id", &self.merchant_id)
            .field("request_host", &self.request_host)
            .finish()
    }
}

/// Trait for looking up signing credentials by key id.
///
/// Implementations may back this with a database, configuration file,
/// or any other credential store.
pub trait CredentialProvider: Send + Sync {
    /// Retrieve the credentials registered under the given key id.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnknownKeyId`] if the key id is not recognized.
    fn get_credentials(&self, key_id: &str) -> Result<Credentials, AuthError>;
}

/// A simple in-memory credential provider backed by a `HashMap`.
///
/// # Examples
///
/// ```
/// use paysign_auth::{CredentialProvider, Credentials, SecretKey, StaticCredentialProvider};
///
/// let credentials = Credentials::new(
///     "key-1",
///     SecretKey::from_base64("c2VjcmV0").unwrap(),
///     "merchant",
///     "localhost",
/// )
/// .unwrap();
/// let provider = StaticCredentialProvider::new(vec![credentials]);
///
/// assert_eq!(provider.get_credentials("key-1").unwrap().merchant_id(), "merchant");
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialProvider {
    credentials: HashMap<String, Credentials>,
}

impl StaticCredentialProvider {
    /// Create a new provider, keyed by each entry's key id.
    pub fn new(credentials: impl IntoIterator<Item = Credentials>) -> Self {
        Self {
            credentials: credentials
                .into_iter()
                .map(|c| (c.key_id.clone(), c))
                .collect(),
        }
    }
}

impl CredentialProvider for StaticCredentialProvider {
    fn get_credentials(&self, key_id: &str) -> Result<Credentials, AuthError> {
        self.credentials
            .get(key_id)
            .cloned()
            .ok_or_else(|| AuthError::UnknownKeyId(key_id.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "K3UY4P0qRlca7fdjzRmVl0yBSefaXZ8OcDhMag9WDtk=";

    fn test_config() -> PaySignConfig {
        PaySignConfig {
            merchant_id: "visa_acceptance_llm_01".to_owned(),
            api_key_id: "9809ebfb-e5ce-43af-8f2d-90f65770c4bc".to_owned(),
            secret_key: TEST_SECRET.to_owned(),
            ..PaySignConfig::default()
        }
    }

    #[test]
    fn test_should_decode_32_byte_secret() {
        let key = SecretKey::from_base64(TEST_SECRET).unwrap();
        assert_eq!(key.len(), 32);
    }

    #[test]
    fn test_should_reject_malformed_secret() {
        let result = SecretKey::from_base64("K3UY4P0q!!");
        assert!(matches!(result, Err(AuthError::MalformedSecret)));
    }

    #[test]
    fn test_should_reject_empty_secret_as_missing_credential() {
        let result = SecretKey::from_base64("");
        assert!(matches!(result, Err(AuthError::MissingCredential("secret_key"))));
    }

    #[test]
    fn test_should_not_print_key_bytes_in_debug() {
        let key = SecretKey::from_base64("c2VjcmV0").unwrap();
        assert_eq!(format!("{key:?}"), "SecretKey(<6 bytes>)");
    }

    #[test]
    fn test_should_build_credentials_from_config() {
        let credentials = Credentials::from_config(&test_config()).unwrap();
        assert_eq!(credentials.key_id(), "9809ebfb-e5ce-43af-8f2d-90f65770c4bc");
        assert_eq!(credentials.merchant_id(), "visa_acceptance_llm_01");
        assert_eq!(credentials.request_host(), "apitest.cybersource.com");
    }

    #[test]
    fn test_should_prefer_overrides_over_config() {
        let overrides = CredentialOverrides {
            merchant_id: Some("other_merchant".to_owned()),
            request_host: Some("localhost:8443".to_owned()),
            key_id: Some(String::new()),
            ..CredentialOverrides::default()
        };
        let credentials = Credentials::resolve(&overrides, &test_config()).unwrap();
        assert_eq!(credentials.merchant_id(), "other_merchant");
        assert_eq!(credentials.request_host(), "localhost:8443");
        // Empty override falls through to configuration.
        assert_eq!(credentials.key_id(), "9809ebfb-e5ce-43af-8f2d-90f65770c4bc");
    }

    #[test]
    fn test_should_fail_on_missing_merchant_id() {
        let config = PaySignConfig {
            merchant_id: String::new(),
            ..test_config()
        };
        let err = Credentials::from_config(&config).unwrap_err();
        assert!(matches!(err, AuthError::MissingCredential("merchant_id")));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_should_report_missing_key_id_from_loaded_config() {
        let config = PaySignConfig::from_lookup(|name| match name {
            "VISA_ACCEPTANCE_MERCHANT_ID" => Some("visa_acceptance_llm_01".to_owned()),
            "VISA_ACCEPTANCE_SECRET_KEY" => Some(TEST_SECRET.to_owned()),
            _ => None,
        })
        .unwrap();
        let err = Credentials::from_config(&config).unwrap_err();
        assert!(matches!(err, AuthError::MissingCredential("key_id")));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_should_fail_on_malformed_configured_secret() {
        let config = PaySignConfig {
            secret_key: "%%%".to_owned(),
            ..test_config()
        };
        let err = Credentials::from_config(&config).unwrap_err();
        assert!(matches!(err, AuthError::MalformedSecret));
    }

    #[test]
    fn test_should_return_error_for_unknown_key_id() {
        let provider = StaticCredentialProvider::new(vec![]);
        let result = provider.get_credentials("UNKNOWN");
        assert!(matches!(result, Err(AuthError::UnknownKeyId(_))));
    }

    #[test]
    fn test_should_return_credentials_for_known_key_id() {
        let credentials = Credentials::from_config(&test_config()).unwrap();
        let provider = StaticCredentialProvider::new(vec![credentials]);
        let found = provider
            .get_credentials("9809ebfb-e5ce-43af-8f2d-90f65770c4bc")
            .unwrap();
        assert_eq!(found.merchant_id(), "visa_acceptance_llm_01");
    }
}
