//! The session manager — owner of the credential, the user record, and the
//! lifecycle between them.
//!
//! State machine:
//!
//! ```text
//! Unauthenticated ──login ok──▶ Resolving ──user ok──▶ Authenticated
//!        ▲                          │                        │
//!        │◀──── resolution failed ──┘                        │
//!        │◀──────────── logout / credential invalid ─────────┘
//! ```
//!
//! `initialize` re-enters `Resolving` when a persisted credential is found
//! at startup. Every credential mutation is mirrored into the durable store
//! and the [`BearerAuth`] header holder together with the in-memory change;
//! a stale header or stale store entry would authenticate requests as a
//! phantom session, so the three surfaces must never disagree.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use pa_identity::{BearerAuth, Credential, IdentityError, IdentityProvider, User};

use crate::store::CredentialStore;

/// Message shown when a login failure carries no service-supplied detail.
const GENERIC_LOGIN_ERROR: &str = "unable to log in";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Public types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Where the session currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No credential. Initial state when nothing was persisted; re-entered
    /// on logout or when a credential turns out to be invalid.
    Unauthenticated,
    /// Credential present, user record not yet resolved.
    Resolving,
    /// Credential and user record both present.
    Authenticated,
}

/// Result of a [`SessionManager::login`] attempt.
///
/// Always returned, never raised: every failure is converted into a
/// `Failure` carrying a message suitable for inline rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Failure { error: String },
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure { error } => Some(error),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Session manager
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// In-memory session fields, guarded as one unit so transitions are atomic.
#[derive(Default)]
struct Inner {
    credential: Option<Credential>,
    user: Option<User>,
    loading: bool,
}

/// Owns the session lifecycle. Constructed once per process with injected
/// collaborators and shared by reference with consumers.
pub struct SessionManager {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn CredentialStore>,
    auth: Arc<BearerAuth>,
    inner: RwLock<Inner>,
    /// Serializes `initialize` and `login` so at most one resolution is in
    /// flight and the last-issued call's result is authoritative.
    resolve_gate: Mutex<()>,
}

impl SessionManager {
    /// Build a manager. `loading` starts true: the startup resolution is
    /// pending until [`SessionManager::initialize`] settles it.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn CredentialStore>,
        auth: Arc<BearerAuth>,
    ) -> Self {
        Self {
            identity,
            store,
            auth,
            inner: RwLock::new(Inner {
                credential: None,
                user: None,
                loading: true,
            }),
            resolve_gate: Mutex::new(()),
        }
    }

    // ── observers ────────────────────────────────────────────────────

    /// Derived state; the fields, not a stored tag, are authoritative.
    pub fn state(&self) -> SessionState {
        let inner = self.inner.read();
        debug_assert!(
            inner.user.is_none() || inner.credential.is_some(),
            "user record without credential"
        );
        match (inner.credential.is_some(), inner.user.is_some()) {
            (true, true) => SessionState::Authenticated,
            (true, false) => SessionState::Resolving,
            (false, _) => SessionState::Unauthenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        let inner = self.inner.read();
        inner.credential.is_some() && inner.user.is_some()
    }

    /// The resolved user record, while authenticated.
    pub fn user(&self) -> Option<User> {
        self.inner.read().user.clone()
    }

    /// True only during the initial resolution after startup or after a
    /// fresh login.
    pub fn loading(&self) -> bool {
        self.inner.read().loading
    }

    // ── operations ───────────────────────────────────────────────────

    /// Startup: read the durable store and, when a credential was
    /// persisted, attempt to resolve it into a user record. Returns the
    /// settled state.
    pub async fn initialize(&self) -> SessionState {
        let _gate = self.resolve_gate.lock().await;

        let persisted = match self.store.load() {
            Ok(credential) => credential,
            Err(e) => {
                tracing::warn!(error = %e, "credential store unreadable, starting unauthenticated");
                None
            }
        };

        let Some(credential) = persisted else {
            let mut inner = self.inner.write();
            inner.credential = None;
            inner.user = None;
            inner.loading = false;
            return SessionState::Unauthenticated;
        };

        tracing::debug!("persisted credential found, resolving user");
        {
            let mut inner = self.inner.write();
            inner.credential = Some(credential.clone());
            inner.user = None;
            inner.loading = true;
            // The store already holds this credential; only the header
            // needs to catch up.
            self.auth.set(credential);
        }

        self.resolve_user().await
    }

    /// Exchange a username/password pair for a session.
    ///
    /// The outcome reflects the login request itself: a credential accepted
    /// at login but rejected during the follow-up resolution still yields
    /// `Success`, with the state settling at `Unauthenticated` (the caller
    /// observes it the same way a page reload would).
    pub async fn login(&self, username: &str, password: &str) -> LoginOutcome {
        let _gate = self.resolve_gate.lock().await;

        let credential = match self.identity.login(username, password).await {
            Ok(credential) => credential,
            Err(IdentityError::Rejected { status, detail }) => {
                tracing::debug!(status, "login rejected");
                return LoginOutcome::Failure {
                    error: detail.unwrap_or_else(|| GENERIC_LOGIN_ERROR.into()),
                };
            }
            Err(e) => {
                tracing::warn!(error = %e, "login request failed");
                return LoginOutcome::Failure {
                    error: GENERIC_LOGIN_ERROR.into(),
                };
            }
        };

        // Persist before touching memory or headers: if the write fails the
        // transition is aborted with nothing mutated, so store, header, and
        // state cannot disagree.
        if let Err(e) = self.store.save(&credential) {
            tracing::error!(error = %e, "persisting credential failed, aborting login");
            return LoginOutcome::Failure {
                error: GENERIC_LOGIN_ERROR.into(),
            };
        }

        {
            let mut inner = self.inner.write();
            inner.credential = Some(credential.clone());
            inner.user = None;
            inner.loading = true;
            self.auth.set(credential);
        }

        self.resolve_user().await;
        LoginOutcome::Success
    }

    /// Tear the session down. Always succeeds, requires no network call,
    /// and is idempotent.
    pub fn logout(&self) {
        tracing::debug!("logging out");
        self.purge();
    }

    // ── internals ────────────────────────────────────────────────────

    /// Resolve the attached credential into its user record.
    ///
    /// This is the single path by which an invalid or stale credential is
    /// purged: any failure clears the session from memory, store, and
    /// headers. Only a failed authenticated request is authoritative.
    async fn resolve_user(&self) -> SessionState {
        match self.identity.current_user().await {
            Ok(user) => {
                let mut inner = self.inner.write();
                // A logout issued while the resolution was in flight wins:
                // the user record must never outlive the credential.
                if inner.credential.is_none() {
                    inner.user = None;
                    inner.loading = false;
                    return SessionState::Unauthenticated;
                }
                inner.user = Some(user);
                inner.loading = false;
                SessionState::Authenticated
            }
            Err(e) => {
                tracing::warn!(error = %e, "credential resolution failed, purging session");
                self.purge();
                SessionState::Unauthenticated
            }
        }
    }

    /// Clear credential, user, persisted entry, and header as one unit.
    fn purge(&self) {
        let mut inner = self.inner.write();
        inner.credential = None;
        inner.user = None;
        inner.loading = false;
        self.auth.clear();
        // Teardown must always succeed; a store that cannot be cleared is
        // logged, not surfaced.
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "clearing persisted credential failed");
        }
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state())
            .field("loading", &self.loading())
            .finish()
    }
}
