use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Environment variable selecting the config file path (default `config.toml`).
pub const CONFIG_ENV: &str = "PORTALAUTH_CONFIG";

/// Environment variable overriding the identity service base URL.
pub const BACKEND_URL_ENV: &str = "PORTALAUTH_BACKEND_URL";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Apply environment overrides on top of the parsed file.
    ///
    /// `PORTALAUTH_BACKEND_URL` wins over `identity.base_url` when set and
    /// non-empty.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.is_empty() {
                self.identity.base_url = url;
            }
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Identity service
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Base URL of the identity service (login + user resolution).
    #[serde(default = "d_base_url")]
    pub base_url: String,
    #[serde(default = "d_8000")]
    pub timeout_ms: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: d_base_url(),
            timeout_ms: 8000,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Credential storage
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Path of the persisted credential file.
    /// Defaults to `~/.portalauth/token` when unset.
    #[serde(default)]
    pub token_path: Option<PathBuf>,
}

// ── serde default helpers ───────────────────────────────────────────

fn d_base_url() -> String {
    "http://localhost:8001".into()
}
fn d_8000() -> u64 {
    8000
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.identity.base_url.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "identity.base_url".into(),
                message: "base_url must not be empty".into(),
            });
        } else if !self.identity.base_url.starts_with("http://")
            && !self.identity.base_url.starts_with("https://")
        {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "identity.base_url".into(),
                message: "base_url must start with http:// or https://".into(),
            });
        }

        if self.identity.base_url.starts_with("http://")
            && !self.identity.base_url.starts_with("http://localhost")
            && !self.identity.base_url.starts_with("http://127.0.0.1")
        {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "identity.base_url".into(),
                message: "plain http to a non-local host sends credentials unencrypted".into(),
            });
        }

        if self.identity.timeout_ms == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "identity.timeout_ms".into(),
                message: "timeout_ms must be greater than 0".into(),
            });
        }

        errors
    }
}
