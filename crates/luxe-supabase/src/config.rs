//! Supabase client configuration.

use luxe_core::BackendError;

/// Configuration for connecting to a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project base URL (e.g. `https://xyzcompany.supabase.co`).
    pub base_url: String,
    /// Anonymous (public) API key, sent as both `apikey` header and
    /// bearer token for unauthenticated calls.
    pub anon_key: String,
}

impl SupabaseConfig {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.into(),
        }
    }

    /// Build a configuration from `LUXE_SUPABASE_URL` and
    /// `LUXE_SUPABASE_ANON_KEY`.
    ///
    /// Either variable missing or an unparsable URL yields
    /// [`BackendError::NotConfigured`]; callers fall back to offline
    /// mode in that case rather than crashing.
    pub fn from_env() -> Result<Self, BackendError> {
        let base_url =
            std::env::var("LUXE_SUPABASE_URL").map_err(|_| BackendError::NotConfigured)?;
        let anon_key =
            std::env::var("LUXE_SUPABASE_ANON_KEY").map_err(|_| BackendError::NotConfigured)?;

        if url::Url::parse(&base_url).is_err() {
            return Err(BackendError::NotConfigured);
        }

        Ok(Self { base_url, anon_key })
    }

    /// Join an API path onto the project base URL.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_handles_trailing_slash() {
        let config = SupabaseConfig::new("https://x.supabase.co/", "anon");
        assert_eq!(
            config.endpoint("/auth/v1/signup"),
            "https://x.supabase.co/auth/v1/signup"
        );
    }
}
