//! Session domain model.

use serde::{Deserialize, Serialize};

/// Role derived from the user's email at the moment a session is
/// established. Never stored or read back from remote data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Administrator,
    Customer,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Administrator)
    }
}

/// The locally held representation of the currently authenticated
/// identity. Replaced wholesale on every auth-state change; consumers
/// read clones and never mutate it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Opaque user identifier from the remote auth service.
    pub user_id: String,
    /// Email, normalized to trimmed lower-case.
    pub email: String,
    pub role: Role,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}
