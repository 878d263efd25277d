//! `pa-identity` — identity service client for PortalAuth.
//!
//! Provides the [`IdentityProvider`] trait that abstracts over the portal
//! backend's authentication API, a production REST implementation
//! ([`RestIdentityClient`]), the shared [`BearerAuth`] header holder that
//! attaches the current credential to every outgoing request, and the
//! [`IdentityError`] taxonomy the session manager pattern-matches on.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pa_domain::config::IdentityConfig;
//! use pa_identity::{BearerAuth, IdentityProvider, RestIdentityClient};
//!
//! # async fn example() -> pa_domain::error::Result<()> {
//! let auth = Arc::new(BearerAuth::new());
//! let client = RestIdentityClient::new(&IdentityConfig::default(), auth.clone())?;
//!
//! let credential = client.login("admin", "admin").await.unwrap();
//! auth.set(credential);
//!
//! let user = client.current_user().await.unwrap();
//! println!("logged in as {}", user.username);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod error;
pub mod provider;
pub mod rest;
pub mod types;

// ── Re-exports for ergonomic imports ─────────────────────────────────

pub use auth::{BearerAuth, Credential};
pub use error::IdentityError;
pub use provider::IdentityProvider;
pub use rest::{from_reqwest, RestIdentityClient};
pub use types::{ErrorBody, TokenResponse, User};
