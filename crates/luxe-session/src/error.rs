//! Session operation error types.

use luxe_core::BackendError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The remote service rejected the credentials and the
    /// auto-registration fallback did not produce an account either.
    /// Carries the original sign-in message, not the registration
    /// failure.
    #[error("invalid credentials: {message}")]
    InvalidCredentials { message: String },

    /// Registration succeeded but the service returned no session: the
    /// user has to confirm the address by email before signing in.
    #[error("email confirmation required for {email}")]
    ConfirmationRequired { email: String },

    /// Any other remote failure, propagated unchanged for display.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl SessionError {
    /// Re-wrap a failed sign-in so the caller sees a credentials
    /// failure rather than whatever the fallback registration said.
    pub(crate) fn from_sign_in(err: BackendError) -> Self {
        match err {
            BackendError::InvalidCredentials { message } => {
                SessionError::InvalidCredentials { message }
            }
            other => SessionError::Backend(other),
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
