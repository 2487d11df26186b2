//! Account and encrypted-record types as stored on disk.
//!
//! Field names are camelCase in JSON.  The plaintext of each credential
//! never appears here, only its cipher token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;
use crate::errors::{Result, SecretBookError};

/// One registered account and its encrypted credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Hex SHA-256 of the login secret.
    pub password_hash: String,

    /// When the account was registered.
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,

    /// Next credential id to hand out.  Older documents lack it; it is
    /// then recovered from the highest stored id.
    #[serde(default)]
    pub next_id: u64,

    /// Encrypted credentials, in insertion order.
    #[serde(rename = "passwords", default)]
    pub credentials: Vec<EncryptedCredential>,
}

impl Account {
    /// Create an empty account with the given login hash.
    pub fn new(password_hash: String) -> Self {
        Self {
            password_hash,
            created_at: Utc::now(),
            next_id: 1,
            credentials: Vec::new(),
        }
    }

    /// Issue a fresh credential id.
    ///
    /// Ids only ever grow: a deleted id is never handed out again, even
    /// if it was the highest one.  Fails once `u64::MAX` has been issued.
    pub fn allocate_id(&mut self) -> Result<u64> {
        let highest = self.credentials.iter().map(|c| c.id).max().unwrap_or(0);
        let id = highest
            .checked_add(1)
            .map(|next| next.max(self.next_id))
            .ok_or(SecretBookError::IdsExhausted)?;
        self.next_id = id.saturating_add(1);
        Ok(id)
    }

    /// Find a stored credential by id.
    pub fn credential_mut(&mut self, id: u64) -> Option<&mut EncryptedCredential> {
        self.credentials.iter_mut().find(|c| c.id == id)
    }
}

/// One credential as stored: an id, a cipher token and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedCredential {
    pub id: u64,

    /// Cipher token wrapping the JSON-serialized `CredentialRecord`.
    #[serde(rename = "data")]
    pub ciphertext: String,

    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,

    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}
