//! The bearer credential and the shared outgoing-header holder.

use parking_lot::RwLock;
use reqwest::RequestBuilder;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Credential
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// An opaque bearer token issued by the identity service.
///
/// Never parsed or inspected client-side; the only thing PortalAuth does
/// with it is attach it to requests and persist it verbatim.
///
/// `Debug` is manually implemented to redact the token value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Credential").field(&"[REDACTED]").finish()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Bearer header holder
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Shared holder for the default `Authorization` header.
///
/// While a credential is set, every request decorated through
/// [`BearerAuth::decorate`] carries `Authorization: Bearer <credential>`;
/// after [`BearerAuth::clear`] the header is absent from subsequent
/// requests. The session manager mutates this holder in lockstep with its
/// in-memory state and the durable store.
///
/// Shared behind an `Arc` between the session manager (writer) and the
/// HTTP client (reader).
#[derive(Default)]
pub struct BearerAuth {
    token: RwLock<Option<Credential>>,
}

impl BearerAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a credential. Subsequent decorated requests carry it.
    pub fn set(&self, credential: Credential) {
        *self.token.write() = Some(credential);
    }

    /// Detach the credential, if any.
    pub fn clear(&self) {
        *self.token.write() = None;
    }

    /// The currently attached credential.
    pub fn token(&self) -> Option<Credential> {
        self.token.read().clone()
    }

    pub fn is_set(&self) -> bool {
        self.token.read().is_some()
    }

    /// Decorate a `RequestBuilder` with the bearer header when a credential
    /// is attached; pass the builder through untouched otherwise.
    pub fn decorate(&self, rb: RequestBuilder) -> RequestBuilder {
        match &*self.token.read() {
            Some(credential) => rb.header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", credential.as_str()),
            ),
            None => rb,
        }
    }
}

// Manual Debug impl to avoid leaking the token value.
impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuth")
            .field("token_set", &self.is_set())
            .finish()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
