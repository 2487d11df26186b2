//! Export bundle envelope.
//!
//! A bundle file is a small JSON object:
//!
//! ```text
//! { "format": "SecretBook_Export_v1.0", "data": "<cipher-token>" }
//! ```
//!
//! The token decrypts, with the exporting account's key, to an
//! `ExportPayload` document.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SecretBookError};
use crate::vault::CredentialRecord;

/// Format tag every bundle must carry.
pub const FORMAT_TAG: &str = "SecretBook_Export_v1.0";

/// Version string written into the decrypted payload.
pub const PAYLOAD_VERSION: &str = "1.0";

/// The outer, unencrypted bundle envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportBundle {
    /// Format tag; checked against `FORMAT_TAG` on import.
    #[serde(default)]
    pub format: String,

    /// Cipher token wrapping the JSON `ExportPayload`.
    #[serde(rename = "data", default)]
    pub ciphertext: String,
}

impl ExportBundle {
    /// Wrap an already-encrypted payload token.
    pub fn new(ciphertext: String) -> Self {
        Self {
            format: FORMAT_TAG.to_string(),
            ciphertext,
        }
    }

    /// Parse a bundle from its JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| {
            SecretBookError::UnsupportedFormat(format!("not a SecretBook export file: {e}"))
        })
    }

    /// Serialize the bundle as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| SecretBookError::SerializationError(format!("export bundle: {e}")))
    }

    /// Read a bundle file from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Write the bundle to disk, replacing any existing file.
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// The decrypted contents of a bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub account: String,
    #[serde(rename = "passwords")]
    pub credentials: Vec<CredentialRecord>,
}
