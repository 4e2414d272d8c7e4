//! Profile record written to the remote profile store.

use serde::{Deserialize, Serialize};

/// Upsert payload for the `profiles` table, keyed by user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpsert {
    pub id: String,
    pub full_name: String,
    pub username: String,
    pub is_admin: bool,
}
