//! Uniform provider error.
//!
//! Adapters collapse every failure mode into one taxonomy; callers
//! never see provider-specific error shapes.

use thiserror::Error;

/// Errors produced by provider gateway calls.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A credential environment variable is not set.
    #[error("missing credential: set {0}")]
    MissingCredential(&'static str),

    /// The provider name is not one of the known adapters.
    #[error("unknown provider '{0}'")]
    UnknownProvider(String),

    /// The HTTP request itself failed (connect, TLS, body).
    #[error("provider request failed: {0}")]
    Http(String),

    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("malformed provider response: {0}")]
    Malformed(String),

    /// The call exceeded the configured bound.
    #[error("provider call timed out after {0}s")]
    Timeout(u64),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Http(e.to_string())
    }
}

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
