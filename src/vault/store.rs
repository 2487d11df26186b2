//! The on-disk account document.
//!
//! One JSON file per installation maps account name -> `Account`.  Every
//! save rewrites the whole document; there is no locking, so two
//! processes writing the same file will clobber each other.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::account::Account;
use crate::errors::{Result, SecretBookError};

/// All accounts in the document, keyed by case-sensitive name.
pub type Accounts = BTreeMap<String, Account>;

/// Handle to the account document at a fixed path.
#[derive(Debug, Clone)]
pub struct AccountStore {
    path: PathBuf,
}

impl AccountStore {
    /// Point a store at `path`.  Nothing is read or created yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the document on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every account from disk.
    ///
    /// A missing file is an empty store.  A file that exists but does
    /// not parse is reported as `StorageCorrupt`.
    pub fn load(&self) -> Result<Accounts> {
        if !self.path.exists() {
            debug!("no account store at {}", self.path.display());
            return Ok(Accounts::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let accounts: Accounts =
            serde_json::from_str(&contents).map_err(|e| SecretBookError::StorageCorrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        debug!("loaded {} account(s)", accounts.len());
        Ok(accounts)
    }

    /// Serialize `accounts` and replace the document atomically.
    ///
    /// Writes to a temp file in the same directory, then renames it over
    /// the target so a crash never leaves a half-written document.
    pub fn save(&self, accounts: &Accounts) -> Result<()> {
        let json = serde_json::to_string_pretty(accounts)
            .map_err(|e| SecretBookError::SerializationError(format!("account store: {e}")))?;

        let parent = self.path.parent().unwrap_or(Path::new("."));
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, json.as_bytes())?;

        // On Unix, restrict permissions to owner-only read/write.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp_path, &self.path)?;

        debug!("saved {} account(s)", accounts.len());
        Ok(())
    }
}
