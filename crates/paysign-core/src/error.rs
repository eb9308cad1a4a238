//! Error types for the PaySign core.

/// Core error type for PaySign infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum PaySignError {
    /// Unknown API environment name.
    #[error("unknown API environment: {0} (expected SANDBOX or PRODUCTION)")]
    UnknownEnvironment(String),
}

/// Convenience result type for PaySign operations.
pub type PaySignResult<T> = Result<T, PaySignError>;
