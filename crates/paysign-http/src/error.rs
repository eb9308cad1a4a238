//! Error types for outbound payment API calls.

use paysign_auth::AuthError;

/// Errors raised while building or sending a signed request.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// Signing failed, including configuration problems with the credentials.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The JSON body could not be serialized.
    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The base URL or assembled request was rejected.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request could not be sent or the response not read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl HttpError {
    /// Whether the error was caused by missing or malformed configuration,
    /// and was therefore raised before any network I/O.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Auth(err) if err.is_configuration())
    }
}

impl From<http::Error> for HttpError {
    fn from(err: http::Error) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_classify_credential_errors_as_configuration() {
        let err = HttpError::from(AuthError::MissingCredential("merchant_id"));
        assert!(err.is_configuration());
        assert!(!HttpError::from(AuthError::MissingBody("POST")).is_configuration());
    }

    #[test]
    fn test_should_keep_auth_error_message() {
        let err = HttpError::from(AuthError::MalformedSecret);
        assert_eq!(err.to_string(), AuthError::MalformedSecret.to_string());
    }
}
