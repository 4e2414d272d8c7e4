//! Collaborator trait definitions for the remote backend.
//!
//! All remote operations are async. The session manager is generic over
//! these traits so the core flow has no dependency on any concrete BaaS
//! client.

use crate::error::BackendResult;
use crate::models::auth::{RemoteSession, SignUpMetadata, SignUpOutcome};
use crate::models::profile::ProfileUpsert;

/// The remote authentication service.
///
/// Each operation returns either a result payload or a typed error; the
/// invalid-credentials kind is distinguishable so callers can branch on
/// it (see [`crate::BackendError::is_invalid_credentials`]).
pub trait AuthBackend: Send + Sync {
    /// Ask the service for an existing valid session, if any.
    fn current_session(&self) -> impl Future<Output = BackendResult<Option<RemoteSession>>> + Send;

    fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = BackendResult<RemoteSession>> + Send;

    fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: SignUpMetadata,
    ) -> impl Future<Output = BackendResult<SignUpOutcome>> + Send;

    fn send_password_reset_email(
        &self,
        email: &str,
        redirect_url: &str,
    ) -> impl Future<Output = BackendResult<()>> + Send;

    fn sign_out(&self) -> impl Future<Output = BackendResult<()>> + Send;
}

/// Remote profile storage. Errors here are non-fatal to registration.
pub trait ProfileStore: Send + Sync {
    fn upsert_profile(
        &self,
        profile: ProfileUpsert,
    ) -> impl Future<Output = BackendResult<()>> + Send;
}

/// Fire-and-forget last-login recording. Failures must never propagate
/// into the primary auth flow.
pub trait LastLoginNotifier: Send + Sync {
    fn record_login(&self, user_id: &str) -> impl Future<Output = BackendResult<()>> + Send;
}
