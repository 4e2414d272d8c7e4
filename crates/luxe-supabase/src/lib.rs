//! LUXE Supabase: HTTP implementations of the backend collaborator
//! traits against a Supabase-style BaaS.
//!
//! This crate provides:
//! - Client configuration ([`SupabaseConfig`])
//! - The auth client ([`SupabaseAuth`], GoTrue REST endpoints)
//! - The profile/last-login client ([`SupabaseProfiles`], PostgREST)
//! - Error mapping into the core taxonomy ([`ApiError`])
//!
//! The platform is treated as a black-box remote service; nothing here
//! knows about its schema beyond the `profiles` table and the
//! `update_last_login` RPC.

mod auth;
mod config;
mod error;
mod profiles;

pub use auth::SupabaseAuth;
pub use config::SupabaseConfig;
pub use error::ApiError;
pub use profiles::SupabaseProfiles;
