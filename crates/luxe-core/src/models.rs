//! Domain models for the LUXE session stack.
//!
//! These are the core types shared across all crates.

pub mod auth;
pub mod profile;
pub mod session;
