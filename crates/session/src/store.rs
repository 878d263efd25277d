//! Durable credential storage.
//!
//! The contract is a single key holding the current credential as plain
//! text: written on login success, removed on logout or invalidation, read
//! once at startup. [`FileCredentialStore`] is the production
//! implementation; [`MemoryCredentialStore`] serves tests and embedders
//! that opt out of persistence.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use pa_domain::error::{Error, Result};
use pa_identity::Credential;

/// Persistence seam for the session manager.
pub trait CredentialStore: Send + Sync {
    /// Read the persisted credential, if any.
    fn load(&self) -> Result<Option<Credential>>;

    /// Persist the credential, replacing any previous one.
    fn save(&self, credential: &Credential) -> Result<()>;

    /// Remove the persisted credential. Must succeed when nothing is stored.
    fn clear(&self) -> Result<()>;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// File-backed store
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Stores the credential as a single plain-text file.
///
/// On Unix the file is created with mode `0o600` from the start to avoid a
/// TOCTOU window where the token could be world-readable.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The default location: `~/.portalauth/token`.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            Error::Auth("unable to determine home directory for credential storage".into())
        })?;
        Ok(home.join(".portalauth").join("token"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credential>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let token = raw.trim_end();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(Credential::new(token)))
    }

    fn save(&self, credential: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = format!("{}\n", credential.as_str());

        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)?;
            file.write_all(contents.as_bytes())?;
        }

        #[cfg(not(unix))]
        std::fs::write(&self.path, contents)?;

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// In-memory store
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Holds the credential in memory only; the session does not survive the
/// process.
#[derive(Default)]
pub struct MemoryCredentialStore {
    slot: RwLock<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the store, as if a credential had been persisted by an
    /// earlier run.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: RwLock::new(Some(credential)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credential>> {
        Ok(self.slot.read().clone())
    }

    fn save(&self, credential: &Credential) -> Result<()> {
        *self.slot.write() = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.write() = None;
        Ok(())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
