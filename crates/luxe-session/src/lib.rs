//! LUXE Session: the current authenticated identity and the operations
//! that establish or clear it.
//!
//! The [`SessionManager`] owns exactly one current session-or-none,
//! derives the role (administrator vs. customer) from the user's email
//! against a configurable allow-list, and exposes login (with an
//! auto-registration fallback), registration, password-reset request,
//! and logout. All credential work is delegated to the remote
//! collaborators defined in `luxe-core`.

pub mod allowlist;
pub mod config;
pub mod error;
pub mod manager;

pub use allowlist::AdminAllowList;
pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use manager::SessionManager;
