//! Credential storage and retrieval.
//!
//! One slot, last write wins. The durable store lives in
//! `<home>/credential.json` with restricted permissions (0600).
//! Credentials are never logged in full.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// A stored credential, tagged by how it was obtained.
///
/// The slot holds exactly one of these at a time; `/login` writes a
/// session token and `/create-api-key` writes an api key over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Credential {
    /// Session token issued by `/login`.
    Session(String),
    /// API key issued by `/create-api-key`.
    ApiKey(String),
}

impl Credential {
    /// Returns the opaque secret carried by this credential.
    pub fn secret(&self) -> &str {
        match self {
            Credential::Session(value) | Credential::ApiKey(value) => value,
        }
    }

    /// Returns the credential kind as a stable label.
    pub fn kind(&self) -> &'static str {
        match self {
            Credential::Session(_) => "session",
            Credential::ApiKey(_) => "api_key",
        }
    }

    /// Returns a display form that never exposes the full secret.
    pub fn masked(&self) -> String {
        let secret = self.secret();
        let visible = secret.chars().take(4).collect::<String>();
        format!("{visible}…")
    }
}

/// Logs the lossy transitions of the single-slot model.
///
/// An api-key write over a session token ends that session with no
/// recovery path; surface it instead of clobbering silently.
fn warn_on_lossy_transition(previous: Option<&Credential>, next: &Credential) {
    if let (Some(Credential::Session(_)), Credential::ApiKey(_)) = (previous, next) {
        tracing::warn!("replacing stored session token with an api key; the session is lost");
    }
}

/// Single-slot credential storage.
///
/// `get` reports absence rather than failing; `set` overwrites
/// unconditionally.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored credential, if any. Never fails; an unreadable
    /// slot is treated as absent.
    fn get(&self) -> Option<Credential>;

    /// Overwrites the slot with `credential`.
    ///
    /// # Errors
    /// Returns an error if the slot cannot be persisted.
    fn set(&self, credential: Credential) -> Result<()>;
}

/// Durable credential store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Creates a store at the default location under the SEOGEN home.
    pub fn at_default_path() -> Self {
        Self::new(paths::credential_path())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<Credential> {
        if !self.path.exists() {
            return None;
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("failed to read credential file: {e}");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(credential) => Some(credential),
            Err(e) => {
                tracing::warn!("ignoring malformed credential file: {e}");
                None
            }
        }
    }

    fn set(&self, credential: Credential) -> Result<()> {
        warn_on_lossy_transition(self.get().as_ref(), &credential);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(&credential).context("Failed to serialize credential")?;

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }
}

/// In-memory credential store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<Credential> {
        self.slot.lock().expect("credential slot poisoned").clone()
    }

    fn set(&self, credential: Credential) -> Result<()> {
        let mut slot = self.slot.lock().expect("credential slot poisoned");
        warn_on_lossy_transition(slot.as_ref(), &credential);
        *slot = Some(credential);
        Ok(())
    }
}
