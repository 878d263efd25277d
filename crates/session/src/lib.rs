//! `pa-session` — session lifecycle management for PortalAuth.
//!
//! Implements the session manager that owns the bearer credential and the
//! authenticated-user record: acquire on login, persist across restarts,
//! attach to outgoing requests, validate opportunistically, tear down on
//! invalidation or explicit logout.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pa_domain::config::IdentityConfig;
//! use pa_identity::{BearerAuth, RestIdentityClient};
//! use pa_session::{FileCredentialStore, SessionManager, SessionState};
//!
//! # async fn example() -> pa_domain::error::Result<()> {
//! let auth = Arc::new(BearerAuth::new());
//! let identity = RestIdentityClient::new(&IdentityConfig::default(), auth.clone())?;
//! let store = FileCredentialStore::new(FileCredentialStore::default_path()?);
//!
//! let session = SessionManager::new(Arc::new(identity), Arc::new(store), auth);
//! if session.initialize().await == SessionState::Authenticated {
//!     println!("welcome back, {}", session.user().unwrap().username);
//! }
//! # Ok(())
//! # }
//! ```

pub mod manager;
pub mod store;

pub use manager::{LoginOutcome, SessionManager, SessionState};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
