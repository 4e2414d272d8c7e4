//! PostgREST client implementing [`ProfileStore`] and
//! [`LastLoginNotifier`].

use std::time::Duration;

use luxe_core::{BackendError, BackendResult, LastLoginNotifier, ProfileStore, ProfileUpsert};

use crate::config::SupabaseConfig;
use crate::error::{ApiError, error_from_response};

/// Supabase profile/last-login client.
///
/// Both operations are best-effort at the call site: the session
/// manager logs and swallows their failures.
pub struct SupabaseProfiles {
    config: SupabaseConfig,
    http: reqwest::Client,
}

impl SupabaseProfiles {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    async fn post(
        &self,
        path: &str,
        prefer: Option<&str>,
        body: &serde_json::Value,
    ) -> Result<(u16, String), ApiError> {
        let mut req = self
            .http
            .post(self.config.endpoint(path))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .json(body);
        if let Some(prefer) = prefer {
            req = req.header("Prefer", prefer);
        }
        let res = req.send().await?;
        let status = res.status().as_u16();
        let body = res.text().await.unwrap_or_default();
        Ok((status, body))
    }
}

impl ProfileStore for SupabaseProfiles {
    async fn upsert_profile(&self, profile: ProfileUpsert) -> BackendResult<()> {
        let payload = serde_json::to_value(&profile).map_err(|e| BackendError::Validation {
            message: format!("unserializable profile: {e}"),
        })?;
        let (status, body) = self
            .post(
                "/rest/v1/profiles",
                Some("resolution=merge-duplicates,return=minimal"),
                &payload,
            )
            .await?;

        if !(200..300).contains(&status) {
            return Err(error_from_response(status, &body));
        }
        Ok(())
    }
}

impl LastLoginNotifier for SupabaseProfiles {
    async fn record_login(&self, user_id: &str) -> BackendResult<()> {
        let (status, body) = self
            .post(
                "/rest/v1/rpc/update_last_login",
                None,
                &serde_json::json!({ "user_id": user_id }),
            )
            .await?;

        if !(200..300).contains(&status) {
            return Err(error_from_response(status, &body));
        }
        Ok(())
    }
}
