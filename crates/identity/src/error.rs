//! Failure taxonomy for identity service calls.
//!
//! Every call either succeeds or falls into exactly one of three buckets,
//! and the session manager pattern-matches on them instead of catching
//! exceptions. There are no retries anywhere: each failure is terminal for
//! that single attempt.

/// Why an identity service call failed.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The service was reachable but refused the request or the attached
    /// credential (any non-2xx status). `detail` carries the service's
    /// human-readable message when the error body had one.
    #[error("rejected by identity service (HTTP {status})")]
    Rejected { status: u16, detail: Option<String> },

    /// The request never completed: connection failure, DNS, or timeout.
    #[error("transport: {0}")]
    Transport(String),

    /// The service returned success but the body could not be interpreted.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl IdentityError {
    /// The service-supplied detail message, when present.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}
