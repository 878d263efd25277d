//! The seam between the session manager and the remote identity service.

use async_trait::async_trait;

use crate::auth::Credential;
use crate::error::IdentityError;
use crate::types::User;

/// Abstraction over the portal backend's authentication API.
///
/// The production implementation is [`crate::RestIdentityClient`]; tests
/// substitute in-memory fakes.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange a username/password pair for a fresh credential.
    async fn login(&self, username: &str, password: &str) -> Result<Credential, IdentityError>;

    /// Resolve the currently attached credential into its user record.
    ///
    /// Any [`IdentityError`] from this call means the credential must be
    /// treated as invalid.
    async fn current_user(&self) -> Result<User, IdentityError>;
}
