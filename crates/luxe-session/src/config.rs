//! Session manager configuration.

/// Configuration for the session manager.
///
/// The admin list is passed in explicitly at construction rather than
/// looked up from the environment inside the manager; [`Self::from_env`]
/// exists for callers that do want the environment as the source.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Email addresses granted the administrator role, in addition to
    /// the fixed fallback addresses and the admin domain suffix.
    pub admin_emails: Vec<String>,
    /// Redirect target handed to the password-reset email (the login
    /// page).
    pub password_reset_redirect: String,
    /// When no remote backend is configured at all, run in offline/demo
    /// mode: login produces a locally persisted mock session and no
    /// remote calls are made.
    pub offline: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            admin_emails: Vec::new(),
            password_reset_redirect: "/login".into(),
            offline: false,
        }
    }
}

impl SessionConfig {
    /// Build a configuration from `LUXE_*` environment variables.
    ///
    /// `LUXE_ADMIN_EMAILS` is a comma-separated list; blank entries are
    /// dropped. `LUXE_PASSWORD_RESET_REDIRECT` overrides the default
    /// login-page target.
    pub fn from_env() -> Self {
        let admin_emails = std::env::var("LUXE_ADMIN_EMAILS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let password_reset_redirect = std::env::var("LUXE_PASSWORD_RESET_REDIRECT")
            .unwrap_or_else(|_| "/login".into());

        Self {
            admin_emails,
            password_reset_redirect,
            offline: false,
        }
    }
}
