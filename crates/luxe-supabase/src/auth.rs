//! GoTrue auth client implementing [`AuthBackend`].
//!
//! The client keeps the last established session in process and emits
//! an [`AuthChange`] as each of its own calls completes, mirroring the
//! auth-state-change subscription the session manager listens on. The
//! manager is the single consumer of that stream.

use std::sync::Mutex;
use std::time::Duration;

use luxe_core::{
    AuthBackend, AuthChange, AuthChangeKind, BackendError, BackendResult, RemoteSession,
    RemoteUser, SignUpMetadata, SignUpOutcome,
};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::info;

use crate::config::SupabaseConfig;
use crate::error::{ApiError, error_from_response};

/// Buffered auth-change notifications; the manager drains them promptly.
const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// GoTrue session payload (sign-in, and sign-up with auto-confirm).
#[derive(Debug, Deserialize)]
struct SessionPayload {
    access_token: String,
    user: UserPayload,
}

/// GoTrue user record.
#[derive(Debug, Deserialize)]
struct UserPayload {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: serde_json::Value,
}

impl UserPayload {
    fn into_remote(self) -> RemoteUser {
        RemoteUser {
            id: self.id,
            email: self.email.unwrap_or_default(),
            user_metadata: self.user_metadata,
        }
    }
}

impl SessionPayload {
    fn into_remote(self) -> RemoteSession {
        RemoteSession {
            access_token: self.access_token,
            user: self.user.into_remote(),
        }
    }
}

/// Supabase auth client.
pub struct SupabaseAuth {
    config: SupabaseConfig,
    http: reqwest::Client,
    cached: Mutex<Option<RemoteSession>>,
    changes: mpsc::Sender<AuthChange>,
}

impl SupabaseAuth {
    /// Build the client and the auth-change stream the session manager
    /// listens on.
    pub fn new(config: SupabaseConfig) -> (Self, mpsc::Receiver<AuthChange>) {
        info!(url = %config.base_url, "configuring Supabase auth client");
        let (tx, rx) = mpsc::channel(CHANGE_CHANNEL_CAPACITY);
        let client = Self {
            config,
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            cached: Mutex::new(None),
            changes: tx,
        };
        (client, rx)
    }

    fn cache(&self, session: Option<RemoteSession>) {
        *self.cached.lock().unwrap_or_else(|e| e.into_inner()) = session;
    }

    fn snapshot(&self) -> Option<RemoteSession> {
        self.cached
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    async fn emit(&self, kind: AuthChangeKind, session: Option<RemoteSession>) {
        // A dropped receiver just means nobody is listening anymore.
        let _ = self.changes.send(AuthChange { kind, session }).await;
    }

    /// POST a JSON body and return the raw (status, body) pair.
    async fn post_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
        bearer: &str,
        body: &serde_json::Value,
    ) -> Result<(u16, String), ApiError> {
        let res = self
            .http
            .post(self.config.endpoint(path))
            .query(query)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await?;
        let status = res.status().as_u16();
        let body = res.text().await.unwrap_or_default();
        Ok((status, body))
    }
}

impl AuthBackend for SupabaseAuth {
    async fn current_session(&self) -> BackendResult<Option<RemoteSession>> {
        Ok(self.snapshot())
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> BackendResult<RemoteSession> {
        let (status, body) = self
            .post_json(
                "/auth/v1/token",
                &[("grant_type", "password")],
                &self.config.anon_key,
                &serde_json::json!({ "email": email, "password": password }),
            )
            .await?;

        if !(200..300).contains(&status) {
            return Err(error_from_response(status, &body));
        }

        let payload: SessionPayload = serde_json::from_str(&body).map_err(|e| {
            BackendError::Remote {
                status,
                message: format!("unexpected sign-in response: {e}"),
            }
        })?;
        let session = payload.into_remote();

        self.cache(Some(session.clone()));
        self.emit(AuthChangeKind::SignedIn, Some(session.clone())).await;
        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: SignUpMetadata,
    ) -> BackendResult<SignUpOutcome> {
        let (status, body) = self
            .post_json(
                "/auth/v1/signup",
                &[],
                &self.config.anon_key,
                &serde_json::json!({
                    "email": email,
                    "password": password,
                    "data": { "full_name": metadata.full_name },
                }),
            )
            .await?;

        if !(200..300).contains(&status) {
            return Err(error_from_response(status, &body));
        }

        // Auto-confirmation enabled: the response is a full session.
        // Confirmation required: a bare user record with no tokens.
        if let Ok(payload) = serde_json::from_str::<SessionPayload>(&body) {
            let session = payload.into_remote();
            self.cache(Some(session.clone()));
            self.emit(AuthChangeKind::SignedIn, Some(session.clone())).await;
            return Ok(SignUpOutcome {
                user_id: Some(session.user.id.clone()),
                session: Some(session),
            });
        }

        let user: UserPayload = serde_json::from_str(&body).map_err(|e| {
            BackendError::Remote {
                status,
                message: format!("unexpected sign-up response: {e}"),
            }
        })?;
        Ok(SignUpOutcome {
            user_id: Some(user.id),
            session: None,
        })
    }

    async fn send_password_reset_email(
        &self,
        email: &str,
        redirect_url: &str,
    ) -> BackendResult<()> {
        let (status, body) = self
            .post_json(
                "/auth/v1/recover",
                &[("redirect_to", redirect_url)],
                &self.config.anon_key,
                &serde_json::json!({ "email": email }),
            )
            .await?;

        if !(200..300).contains(&status) {
            return Err(error_from_response(status, &body));
        }
        Ok(())
    }

    async fn sign_out(&self) -> BackendResult<()> {
        // The local session is dropped no matter how the remote call
        // goes; the error is still reported to the caller.
        let result = match self.snapshot() {
            Some(session) => match self
                .post_json(
                    "/auth/v1/logout",
                    &[],
                    &session.access_token,
                    &serde_json::json!({}),
                )
                .await
            {
                // An already-expired token is as signed out as it gets.
                Ok((status, _)) if (200..300).contains(&status) || status == 401 => Ok(()),
                Ok((status, body)) => Err(error_from_response(status, &body)),
                Err(e) => Err(e.into()),
            },
            None => Ok(()),
        };

        self.cache(None);
        self.emit(AuthChangeKind::SignedOut, None).await;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_payload_keeps_user_metadata() {
        let payload: SessionPayload = serde_json::from_str(
            r#"{
                "access_token": "jwt",
                "user": {
                    "id": "u-1",
                    "email": "a@x.com",
                    "user_metadata": { "full_name": "Ada" }
                }
            }"#,
        )
        .unwrap();

        let remote = payload.into_remote();
        assert_eq!(remote.user.id, "u-1");
        assert_eq!(remote.user.metadata_str("full_name").as_deref(), Some("Ada"));
    }

    #[test]
    fn bare_user_payload_parses_without_metadata() {
        let user: UserPayload = serde_json::from_str(r#"{"id":"u-2"}"#).unwrap();
        let remote = user.into_remote();
        assert_eq!(remote.id, "u-2");
        assert_eq!(remote.email, "");
    }
}
