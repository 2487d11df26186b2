use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SecretBookError};

/// Installation-level configuration, loaded from
/// `<data_dir>/secretbook.toml`.
///
/// Every field has a sensible default so SecretBook works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// File name of the account document inside the data directory.
    #[serde(default = "default_store_file")]
    pub store_file: String,

    /// Account to use when none is given on the command line.
    #[serde(default)]
    pub default_account: Option<String>,

    /// Minimum login secret length accepted at registration.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,

    /// `tracing` filter used when `SECRETBOOK_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_store_file() -> String {
    "users.json".to_string()
}

fn default_min_password_len() -> usize {
    6
}

fn default_log_filter() -> String {
    "warn".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_file: default_store_file(),
            default_account: None,
            min_password_len: default_min_password_len(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the data directory.
    const FILE_NAME: &'static str = "secretbook.toml";

    /// Load settings from `<data_dir>/secretbook.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            SecretBookError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Full path to the account document.
    ///
    /// Example: `~/.secretbook/users.json`
    pub fn store_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.store_file)
    }
}

/// Default data directory: `~/.secretbook`.
pub fn default_data_dir() -> Result<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".secretbook"))
        .ok_or_else(|| SecretBookError::ConfigError("cannot determine home directory".into()))
}

// ── Tests ────────────────────────────────────────────────────────────
