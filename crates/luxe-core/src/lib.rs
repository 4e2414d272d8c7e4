//! LUXE Core: domain models, error taxonomy, and backend collaborator
//! traits shared across the session crates.
//!
//! This crate provides:
//! - Domain models ([`Session`], [`Role`], remote auth payloads)
//! - The cross-crate error taxonomy ([`BackendError`])
//! - Trait definitions for the remote collaborators ([`AuthBackend`],
//!   [`ProfileStore`], [`LastLoginNotifier`])
//! - A key-value fallback store ([`LocalStore`], [`MemoryStore`])
//!
//! Concrete backend implementations live in `luxe-supabase`; the session
//! manager that orchestrates them lives in `luxe-session`.

pub mod backend;
pub mod error;
pub mod models;
pub mod store;

pub use backend::{AuthBackend, LastLoginNotifier, ProfileStore};
pub use error::{BackendError, BackendResult};
pub use models::auth::{
    AuthChange, AuthChangeKind, RemoteSession, RemoteUser, SignUpMetadata, SignUpOutcome,
};
pub use models::profile::ProfileUpsert;
pub use models::session::{Role, Session};
pub use store::{LocalStore, MemoryStore};
