//! Error types for HTTP signature signing and verification.
//!
//! All failures are represented by [`AuthError`]. Signing can only fail on
//! configuration problems or caller mistakes; there are no transient errors,
//! so nothing in this crate is worth retrying.

/// Errors that can occur while signing or verifying a request.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The shared secret is not valid base64, or decodes to nothing.
    #[error("Shared secret is not valid base64")]
    MalformedSecret,

    /// A required credential field is empty.
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    /// The HTTP method is not one of GET, POST or PATCH.
    #[error("Unsupported HTTP method for signing: {0}")]
    InvalidMethod(String),

    /// A POST or PATCH request was signed without its body or body digest.
    #[error("Request body is required for {0} requests")]
    MissingBody(&'static str),

    /// A signed header value contains bytes not allowed in HTTP headers.
    #[error("Invalid value for header: {0}")]
    InvalidHeaderValue(&'static str),

    /// The `signature` header is missing from the request.
    #[error("Missing signature header")]
    MissingSignatureHeader,

    /// The `signature` header could not be parsed.
    #[error("Invalid signature header format")]
    InvalidSignatureHeader,

    /// The signing algorithm is not supported (only HmacSHA256 is supported).
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The signed header list does not match the list the method requires.
    #[error("Unexpected signed header list: {0}")]
    UnexpectedHeaderList(String),

    /// A header covered by the signature is missing.
    #[error("Missing required header: {0}")]
    MissingHeader(String),

    /// The key id was not found in the credential store.
    #[error("Key id not found: {0}")]
    UnknownKeyId(String),

    /// The merchant id header does not belong to the signing key.
    #[error("Merchant id does not match key: {0}")]
    MerchantMismatch(String),

    /// The request was signed for a host other than the key's host.
    #[error("Host does not match key: {0}")]
    HostMismatch(String),

    /// The `digest` header does not match the received body.
    #[error("Digest does not match request body")]
    DigestMismatch,

    /// The computed signature does not match the provided signature.
    #[error("Signature does not match")]
    SignatureDoesNotMatch,
}

impl AuthError {
    /// Whether this error stems from bad configuration rather than a bad request.
    ///
    /// Configuration errors must abort the call before any network I/O and are
    /// never retried.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::MalformedSecret | Self::MissingCredential(_))
    }
}
