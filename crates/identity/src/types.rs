//! Typed DTOs matching the portal backend's wire format.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Successful login payload.
///
/// `Debug` is manually implemented to redact the token.
#[derive(Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// The authenticated principal as returned by `/api/me`.
///
/// Only `username` is contractual; any further profile fields the backend
/// chooses to send are carried verbatim in `profile` and replaced wholesale
/// on each resolution, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

/// Error body the backend sends with non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_carries_extra_profile_fields() {
        let user: User =
            serde_json::from_str(r#"{"username":"admin","role":"superuser","id":7}"#).unwrap();
        assert_eq!(user.username, "admin");
        assert_eq!(user.profile["role"], "superuser");
        assert_eq!(user.profile["id"], 7);
    }

    #[test]
    fn user_without_extras_parses() {
        let user: User = serde_json::from_str(r#"{"username":"admin"}"#).unwrap();
        assert!(user.profile.is_empty());
    }

    #[test]
    fn user_without_username_is_rejected() {
        assert!(serde_json::from_str::<User>(r#"{"name":"admin"}"#).is_err());
    }

    #[test]
    fn token_response_debug_is_redacted() {
        let resp: TokenResponse =
            serde_json::from_str(r#"{"access_token":"tok-xyz","token_type":"bearer"}"#).unwrap();
        let debug_str = format!("{resp:?}");
        assert!(!debug_str.contains("tok-xyz"));
    }

    #[test]
    fn error_body_tolerates_missing_detail() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.detail.is_none());
    }
}
