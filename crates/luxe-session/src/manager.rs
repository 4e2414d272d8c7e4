//! Session manager: login, registration, and session lifecycle
//! orchestration.

use luxe_core::{
    AuthBackend, AuthChange, AuthChangeKind, LastLoginNotifier, LocalStore, ProfileStore,
    ProfileUpsert, RemoteSession, Session, SignUpMetadata,
};
use tokio::sync::{mpsc, watch};

use crate::allowlist::{AdminAllowList, normalize_email};
use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};

/// Local-store key for the serialized mock session in offline mode.
const MOCK_USER_KEY: &str = "auth:user";

/// User id assigned to offline mock sessions.
const MOCK_USER_ID: &str = "mock-user";

/// The local part of an email address, used as the default display name
/// and profile username.
fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Session manager.
///
/// Generic over the remote collaborators so the flow has no dependency
/// on any concrete backend client.
///
/// The single current-session slot is a `watch` channel: consumers take
/// snapshots via [`Self::current`] or subscribe via [`Self::subscribe`].
/// Every update is a full replacement. When a backend is configured,
/// `login` never writes the slot itself; only the auth-change listener
/// does, so the in-flight sign-in request and the listener cannot race
/// each other into an inconsistent state.
pub struct SessionManager<B, P, N, L> {
    backend: B,
    profiles: P,
    notifier: N,
    local: L,
    allow_list: AdminAllowList,
    config: SessionConfig,
    slot: watch::Sender<Option<Session>>,
}

impl<B, P, N, L> SessionManager<B, P, N, L>
where
    B: AuthBackend,
    P: ProfileStore,
    N: LastLoginNotifier,
    L: LocalStore,
{
    pub fn new(backend: B, profiles: P, notifier: N, local: L, config: SessionConfig) -> Self {
        let allow_list = AdminAllowList::new(&config.admin_emails);
        let (slot, _) = watch::channel(None);
        Self {
            backend,
            profiles,
            notifier,
            local,
            allow_list,
            config,
            slot,
        }
    }

    /// Snapshot of the current session, if any.
    pub fn current(&self) -> Option<Session> {
        self.slot.borrow().clone()
    }

    /// Subscribe to session replacements. Receivers see each full
    /// replacement of the slot, never partial updates.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.slot.subscribe()
    }

    /// One-time startup: adopt an existing remote session if the
    /// service reports one. An unreachable or misconfigured backend is
    /// not an error; the manager becomes ready with no session.
    pub async fn init(&self) {
        if self.config.offline {
            self.restore_offline();
            return;
        }

        match self.backend.current_session().await {
            Ok(Some(remote)) => {
                let session = self.build_session(&remote);
                let user_id = session.user_id.clone();
                self.slot.send_replace(Some(session));
                self.notify_last_login(&user_id).await;
            }
            Ok(None) => {
                self.slot.send_replace(None);
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "auth backend unavailable at startup, continuing without a session"
                );
                self.slot.send_replace(None);
            }
        }
    }

    /// Consume the backend's auth-change stream. This is the single
    /// writer for the slot on the sign-in path; run it on its own task.
    pub async fn run_listener(&self, mut changes: mpsc::Receiver<AuthChange>) {
        while let Some(change) = changes.recv().await {
            self.apply_change(change).await;
        }
        tracing::debug!("auth-change stream closed");
    }

    /// Apply one auth-state change. The attached session, when present,
    /// fully replaces the slot; when absent the slot is cleared. Last
    /// write wins.
    pub async fn apply_change(&self, change: AuthChange) {
        match change.session {
            Some(remote) => {
                let session = self.build_session(&remote);
                let user_id = session.user_id.clone();
                self.slot.send_replace(Some(session));
                if matches!(
                    change.kind,
                    AuthChangeKind::SignedIn | AuthChangeKind::TokenRefreshed
                ) {
                    self.notify_last_login(&user_id).await;
                }
            }
            None => {
                self.slot.send_replace(None);
            }
        }
    }

    /// Sign in, auto-registering first-time users.
    ///
    /// On success the slot is populated by the auth-change listener,
    /// not by this call.
    pub async fn login(&self, email: &str, password: &str) -> SessionResult<()> {
        let email = normalize_email(email);

        if self.config.offline {
            return self.offline_login(&email);
        }

        // 1. Attempt sign-in.
        let sign_in_err = match self.backend.sign_in_with_password(&email, password).await {
            Ok(_) => return Ok(()),
            Err(e) if e.is_invalid_credentials() => e,
            Err(e) => return Err(e.into()),
        };

        // 2. Invalid credentials may mean a first-time user: attempt
        //    automatic registration with the same credentials.
        let metadata = SignUpMetadata {
            full_name: local_part(&email).to_string(),
        };
        let outcome = match self.backend.sign_up(&email, password, metadata).await {
            Ok(outcome) => outcome,
            Err(sign_up_err) => {
                // The user-facing message must reflect the failed
                // sign-in, not the failed registration.
                tracing::debug!(error = %sign_up_err, "auto-registration failed");
                return Err(SessionError::from_sign_in(sign_in_err));
            }
        };

        // 3. New account: record the profile best-effort.
        if let Some(user_id) = &outcome.user_id {
            self.upsert_profile(user_id, &email, local_part(&email))
                .await;
        }

        // 4. No session back means the service wants the address
        //    confirmed by email before sign-in works.
        match outcome.session {
            Some(_) => Ok(()),
            None => Err(SessionError::ConfirmationRequired { email }),
        }
    }

    /// Create an account. The profile upsert is best-effort: a failure
    /// is logged and swallowed, registration still succeeds.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> SessionResult<()> {
        let email = normalize_email(email);

        if self.config.offline {
            return Ok(());
        }

        let full_name = display_name
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| local_part(&email).to_string());

        let outcome = self
            .backend
            .sign_up(
                &email,
                password,
                SignUpMetadata {
                    full_name: full_name.clone(),
                },
            )
            .await?;

        if let Some(user_id) = &outcome.user_id {
            self.upsert_profile(user_id, &email, &full_name).await;
        }

        Ok(())
    }

    /// Request a password-reset email with the configured login-page
    /// redirect.
    pub async fn reset_password(&self, email: &str) -> SessionResult<()> {
        let email = normalize_email(email);

        if self.config.offline {
            return Ok(());
        }

        self.backend
            .send_password_reset_email(&email, &self.config.password_reset_redirect)
            .await?;
        Ok(())
    }

    /// Sign out remotely best-effort, then unconditionally clear the
    /// slot and the persisted offline copy.
    pub async fn logout(&self) {
        if !self.config.offline {
            if let Err(e) = self.backend.sign_out().await {
                tracing::warn!(error = %e, "remote sign-out failed, clearing local session anyway");
            }
        }
        self.slot.send_replace(None);
        self.local.remove(MOCK_USER_KEY);
    }

    /// Build a [`Session`] from a remote payload. The role is
    /// recomputed from the allow-list on every build, never read from
    /// remote data.
    fn build_session(&self, remote: &RemoteSession) -> Session {
        let email = normalize_email(&remote.user.email);
        Session {
            user_id: remote.user.id.clone(),
            role: self.allow_list.derive_role(&email),
            display_name: remote.user.metadata_str("full_name"),
            avatar_url: remote.user.metadata_str("avatar_url"),
            email,
        }
    }

    async fn notify_last_login(&self, user_id: &str) {
        if let Err(e) = self.notifier.record_login(user_id).await {
            tracing::warn!(error = %e, user_id, "last-login notification failed");
        }
    }

    async fn upsert_profile(&self, user_id: &str, email: &str, full_name: &str) {
        let profile = ProfileUpsert {
            id: user_id.to_string(),
            full_name: full_name.to_string(),
            username: local_part(email).to_string(),
            is_admin: self.allow_list.derive_role(email).is_admin(),
        };
        if let Err(e) = self.profiles.upsert_profile(profile).await {
            tracing::warn!(error = %e, user_id, "profile upsert failed");
        }
    }

    fn offline_login(&self, email: &str) -> SessionResult<()> {
        let session = Session {
            user_id: MOCK_USER_ID.into(),
            email: email.to_string(),
            role: self.allow_list.derive_role(email),
            display_name: None,
            avatar_url: None,
        };
        match serde_json::to_string(&session) {
            Ok(json) => self.local.set(MOCK_USER_KEY, &json),
            Err(e) => tracing::warn!(error = %e, "could not persist offline session"),
        }
        self.slot.send_replace(Some(session));
        Ok(())
    }

    fn restore_offline(&self) {
        if let Some(raw) = self.local.get(MOCK_USER_KEY) {
            match serde_json::from_str::<Session>(&raw) {
                Ok(mut session) => {
                    // Recompute the role; the persisted copy is not
                    // trusted for authorization.
                    session.role = self.allow_list.derive_role(&session.email);
                    self.slot.send_replace(Some(session));
                    return;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unreadable persisted session");
                    self.local.remove(MOCK_USER_KEY);
                }
            }
        }
        self.slot.send_replace(None);
    }
}
