//! Error types for the LUXE session stack.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The remote auth service rejected the supplied credentials. This is
    /// the one failure kind callers branch on, so it is kept distinct from
    /// every other remote error.
    #[error("invalid credentials: {message}")]
    InvalidCredentials { message: String },

    /// No backend URL/key was supplied at process start.
    #[error("backend is not configured")]
    NotConfigured,

    #[error("network error: {0}")]
    Network(String),

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("validation error: {message}")]
    Validation { message: String },

    /// Any other remote failure, carried through with its status and
    /// human-readable message for display.
    #[error("remote error ({status}): {message}")]
    Remote { status: u16, message: String },
}

impl BackendError {
    /// Whether this error is the invalid-credentials kind that triggers
    /// the auto-registration fallback.
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, BackendError::InvalidCredentials { .. })
    }
}

pub type BackendResult<T> = Result<T, BackendError>;
