//! REST implementation of [`IdentityProvider`].
//!
//! `RestIdentityClient` wraps a `reqwest::Client` and translates both trait
//! methods into HTTP calls against the portal backend. Login posts the
//! credentials as `application/x-www-form-urlencoded` (the backend's wire
//! contract, not JSON); user resolution goes through the shared
//! [`BearerAuth`] holder so the `Authorization` header always reflects the
//! session manager's view of the credential.
//!
//! There is deliberately no retry machinery here: the session manager treats
//! every failure as terminal for the attempt and decides what it means.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use pa_domain::config::IdentityConfig;
use pa_domain::error::{Error, Result};

use crate::auth::{BearerAuth, Credential};
use crate::error::IdentityError;
use crate::provider::IdentityProvider;
use crate::types::{ErrorBody, TokenResponse, User};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Client
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A REST client for the portal identity service.
///
/// Created once and reused for the lifetime of the process. The underlying
/// `reqwest::Client` maintains a connection pool.
#[derive(Debug, Clone)]
pub struct RestIdentityClient {
    http: Client,
    base_url: String,
    auth: Arc<BearerAuth>,
}

impl RestIdentityClient {
    /// Build a new client from the shared [`IdentityConfig`].
    pub fn new(cfg: &IdentityConfig, auth: Arc<BearerAuth>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        let base_url = cfg.base_url.trim_end_matches('/').to_owned();

        Ok(Self {
            http,
            base_url,
            auth,
        })
    }

    /// The shared header holder this client reads from.
    pub fn auth(&self) -> &Arc<BearerAuth> {
        &self.auth
    }

    /// Build the full URL for a path like `/api/login`.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait]
impl IdentityProvider for RestIdentityClient {
    async fn login(&self, username: &str, password: &str) -> std::result::Result<Credential, IdentityError> {
        let url = self.url("/api/login");
        let resp = self
            .http
            .post(&url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        let body = resp.text().await.map_err(from_reqwest)?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail);
            tracing::debug!(status = status.as_u16(), "login rejected");
            return Err(IdentityError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| IdentityError::Malformed(format!("login response: {e}")))?;
        if token.access_token.is_empty() {
            return Err(IdentityError::Malformed(
                "login response carried an empty access_token".into(),
            ));
        }

        Ok(Credential::new(token.access_token))
    }

    async fn current_user(&self) -> std::result::Result<User, IdentityError> {
        let url = self.url("/api/me");
        let resp = self
            .auth
            .decorate(self.http.get(&url))
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        let body = resp.text().await.map_err(from_reqwest)?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail);
            tracing::debug!(status = status.as_u16(), "user resolution rejected");
            return Err(IdentityError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| IdentityError::Malformed(format!("user record: {e}")))
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Error conversion helper
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Convert a `reqwest::Error` into an [`IdentityError`].
///
/// Everything that prevented a response from arriving — connection failures,
/// DNS, timeouts — is a transport failure. Body-decode errors can only come
/// from reading a success response and classify as malformed.
pub fn from_reqwest(e: reqwest::Error) -> IdentityError {
    if e.is_decode() {
        IdentityError::Malformed(e.to_string())
    } else {
        IdentityError::Transport(e.to_string())
    }
}
