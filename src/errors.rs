use std::path::PathBuf;
use thiserror::Error;

use crate::vault::CredentialEntry;

/// All errors that can occur in SecretBook.
#[derive(Debug, Error)]
pub enum SecretBookError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: wrong account key or corrupted data")]
    DecryptionFailed,

    // --- Account errors ---
    #[error("Account '{0}' already exists")]
    AccountExists(String),

    #[error("Invalid account name or password")]
    InvalidCredentials,

    #[error("No account is logged in")]
    NotLoggedIn,

    // --- Credential errors ---
    #[error("{}", describe_duplicate(.0))]
    DuplicateFound(Box<CredentialEntry>),

    #[error("No credential ids left in this account")]
    IdsExhausted,

    // --- Storage errors ---
    #[error("Account store at {path} is corrupt: {reason}")]
    StorageCorrupt { path: PathBuf, reason: String },

    // --- Import/export errors ---
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("Malformed export payload: {0}")]
    MalformedPayload(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

impl SecretBookError {
    /// The existing entry carried by a `DuplicateFound` error.
    pub fn duplicate(&self) -> Option<&CredentialEntry> {
        match self {
            Self::DuplicateFound(entry) => Some(entry),
            _ => None,
        }
    }
}

fn describe_duplicate(existing: &CredentialEntry) -> String {
    format!(
        "A credential for '{}' / '{}' already exists (id {})",
        existing.record.website, existing.record.username, existing.id
    )
}

/// Convenience type alias for SecretBook results.
pub type Result<T> = std::result::Result<T, SecretBookError>;
