//! Remote authentication payloads and auth-state change events.

use serde::{Deserialize, Serialize};

/// The user record inside a remote session payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteUser {
    pub id: String,
    pub email: String,
    /// Free-form metadata attached at sign-up (`full_name`, `avatar_url`).
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

impl RemoteUser {
    /// Read a string field out of the user metadata, if present.
    pub fn metadata_str(&self, key: &str) -> Option<String> {
        self.user_metadata
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}

/// A valid credential/session pair delivered by the remote auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSession {
    pub access_token: String,
    pub user: RemoteUser,
}

/// The kind of auth-state change the remote service reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChangeKind {
    SignedIn,
    TokenRefreshed,
    UserUpdated,
    SignedOut,
}

/// One auth-state change notification. The attached session, when
/// present, fully replaces any previously held session.
#[derive(Debug, Clone)]
pub struct AuthChange {
    pub kind: AuthChangeKind,
    pub session: Option<RemoteSession>,
}

/// Metadata attached to a sign-up request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpMetadata {
    pub full_name: String,
}

/// Result of a sign-up call.
///
/// A missing session means the service requires email confirmation
/// before the account becomes usable.
#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    pub user_id: Option<String>,
    pub session: Option<RemoteSession>,
}
