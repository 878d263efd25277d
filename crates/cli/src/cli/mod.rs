pub mod config;
pub mod login;
pub mod session_cmd;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use pa_domain::config::Config;
use pa_identity::{BearerAuth, RestIdentityClient};
use pa_session::{FileCredentialStore, SessionManager};

/// portalauth — session client for the admin portal backend.
#[derive(Debug, Parser)]
#[command(name = "portalauth", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and persist the session credential.
    Login {
        /// Username to authenticate as. The password is prompted.
        username: String,
    },
    /// Show the current session state (default when no subcommand is given).
    Status,
    /// Print the authenticated user record as JSON.
    Whoami,
    /// Tear down the session and remove the persisted credential.
    Logout,
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration from the path specified by `PORTALAUTH_CONFIG`
/// (or `config.toml` by default), then apply environment overrides.
/// Returns the parsed [`Config`] and the path that was used.
pub fn load_config() -> anyhow::Result<(Config, String)> {
    let config_path =
        std::env::var(pa_domain::config::CONFIG_ENV).unwrap_or_else(|_| "config.toml".into());

    let mut config: Config = if std::path::Path::new(&config_path).exists() {
        let raw = std::fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("reading {config_path}: {e}"))?;
        toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {config_path}: {e}"))?
    } else {
        Config::default()
    };
    config.apply_env_overrides();

    Ok((config, config_path))
}

// ── Session wiring helper ─────────────────────────────────────────────

/// Wire up the session manager with its production collaborators: the REST
/// identity client, the file-backed credential store, and the shared
/// bearer-header holder.
pub fn build_session(config: &Config) -> anyhow::Result<SessionManager> {
    let auth = Arc::new(BearerAuth::new());
    let identity = RestIdentityClient::new(&config.identity, auth.clone())?;

    let token_path = match &config.storage.token_path {
        Some(path) => path.clone(),
        None => FileCredentialStore::default_path()?,
    };
    let store = FileCredentialStore::new(token_path);

    Ok(SessionManager::new(
        Arc::new(identity),
        Arc::new(store),
        auth,
    ))
}
