//! High-level credential operations for one logged-in account.
//!
//! `CredentialRepository` ties the account document, the account key and
//! the cipher together so that callers can work with plaintext
//! `CredentialRecord`s.  Every mutating call is a full
//! load -> mutate -> save cycle against the `AccountStore`.

use chrono::Utc;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::crypto::{decrypt, derive_key, encrypt, hash_secret, verify_secret, VaultKey};
use crate::errors::{Result, SecretBookError};

use super::account::{Account, EncryptedCredential};
use super::record::{CredentialEntry, CredentialRecord};
use super::store::{AccountStore, Accounts};

/// The logged-in account and its key (zeroized on drop).
struct Session {
    account: String,
    key: VaultKey,
}

/// Credential CRUD over the current account.
///
/// Construct one per store with `CredentialRepository::new`, then
/// `login` before using any credential operation.
pub struct CredentialRepository {
    store: AccountStore,
    session: Option<Session>,
}

impl CredentialRepository {
    /// Create a repository over `store` with no active session.
    pub fn new(store: AccountStore) -> Self {
        Self {
            store,
            session: None,
        }
    }

    /// Returns the underlying account store.
    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    // ------------------------------------------------------------------
    // Accounts and sessions
    // ------------------------------------------------------------------

    /// Register a new, empty account.
    pub fn register(&self, name: &str, secret: &str) -> Result<()> {
        let mut accounts = self.store.load()?;
        if accounts.contains_key(name) {
            return Err(SecretBookError::AccountExists(name.to_string()));
        }

        accounts.insert(name.to_string(), Account::new(hash_secret(secret)));
        self.store.save(&accounts)?;

        info!(account = name, "registered account");
        Ok(())
    }

    /// Authenticate and start a session for `name`.
    ///
    /// The session key is derived from the account name alone; the
    /// secret is only checked against the stored hash.
    pub fn login(&mut self, name: &str, secret: &str) -> Result<()> {
        let accounts = self.store.load()?;
        let account = accounts
            .get(name)
            .ok_or(SecretBookError::InvalidCredentials)?;

        if !verify_secret(secret, &account.password_hash) {
            warn!(account = name, "login rejected");
            return Err(SecretBookError::InvalidCredentials);
        }

        self.session = Some(Session {
            account: name.to_string(),
            key: derive_key(name),
        });

        info!(account = name, "logged in");
        Ok(())
    }

    /// End the current session, wiping the key from memory.
    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(account = %session.account, "logged out");
        }
    }

    /// Name of the logged-in account, if any.
    pub fn current_account(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.account.as_str())
    }

    // ------------------------------------------------------------------
    // Credential operations
    // ------------------------------------------------------------------

    /// Decrypt every credential of the current account.
    ///
    /// Records that fail to decrypt are skipped so one bad token cannot
    /// hide the rest.
    pub fn list_credentials(&self) -> Result<Vec<CredentialEntry>> {
        let session = self.session()?;
        let accounts = self.store.load()?;
        let account = Self::account_of(&accounts, &session.account)?;

        let entries = account
            .credentials
            .iter()
            .filter_map(|stored| match Self::open_entry(&session.key, stored) {
                Ok(entry) => Some(entry),
                Err(_) => {
                    warn!(id = stored.id, "skipping unreadable credential");
                    None
                }
            })
            .collect();

        Ok(entries)
    }

    /// Look up one credential by id.
    pub fn get(&self, id: u64) -> Result<Option<CredentialEntry>> {
        Ok(self.list_credentials()?.into_iter().find(|e| e.id == id))
    }

    /// Find a live credential with the same `(website, username)` pair,
    /// compared case-insensitively, skipping `exclude_id` if given.
    pub fn find_duplicate(
        &self,
        website: &str,
        username: &str,
        exclude_id: Option<u64>,
    ) -> Result<Option<CredentialEntry>> {
        Ok(self.list_credentials()?.into_iter().find(|e| {
            Some(e.id) != exclude_id && e.record.same_identity(website, username)
        }))
    }

    /// Store a new credential and return its id.
    ///
    /// Unless `force` is set, an existing credential with the same
    /// identity makes this fail with `DuplicateFound`.
    pub fn save(&self, record: &CredentialRecord, force: bool) -> Result<u64> {
        if !force {
            if let Some(existing) = self.find_duplicate(&record.website, &record.username, None)? {
                return Err(SecretBookError::DuplicateFound(Box::new(existing)));
            }
        }

        let session = self.session()?;
        let ciphertext = Self::seal_record(&session.key, record)?;

        let mut accounts = self.store.load()?;
        let account = Self::account_of_mut(&mut accounts, &session.account)?;
        let id = account.allocate_id()?;
        account.credentials.push(EncryptedCredential {
            id,
            ciphertext,
            created_at: Utc::now(),
            updated_at: None,
        });
        self.store.save(&accounts)?;

        debug!(id, force, "saved credential");
        Ok(id)
    }

    /// Replace the contents of credential `id`.
    ///
    /// The duplicate check ignores `id` itself.  An unknown `id` is a
    /// silent no-op that still returns `Ok`.
    pub fn update(&self, id: u64, record: &CredentialRecord, force: bool) -> Result<()> {
        if !force {
            if let Some(existing) =
                self.find_duplicate(&record.website, &record.username, Some(id))?
            {
                return Err(SecretBookError::DuplicateFound(Box::new(existing)));
            }
        }

        let session = self.session()?;
        let mut accounts = self.store.load()?;
        let account = Self::account_of_mut(&mut accounts, &session.account)?;

        let Some(stored) = account.credential_mut(id) else {
            debug!(id, "update of unknown credential ignored");
            return Ok(());
        };
        stored.ciphertext = Self::seal_record(&session.key, record)?;
        stored.updated_at = Some(Utc::now());
        self.store.save(&accounts)?;

        debug!(id, force, "updated credential");
        Ok(())
    }

    /// Remove credential `id` if it exists.
    pub fn delete(&self, id: u64) -> Result<()> {
        let session = self.session()?;
        let mut accounts = self.store.load()?;
        let account = Self::account_of_mut(&mut accounts, &session.account)?;

        let before = account.credentials.len();
        account.credentials.retain(|c| c.id != id);
        if account.credentials.len() == before {
            debug!(id, "delete of unknown credential ignored");
            return Ok(());
        }
        self.store.save(&accounts)?;

        debug!(id, "deleted credential");
        Ok(())
    }

    /// Drop every credential of the current account.  The id counter is
    /// kept, so ids issued afterwards are still fresh.
    pub fn clear(&self) -> Result<()> {
        let session = self.session()?;
        let mut accounts = self.store.load()?;
        let account = Self::account_of_mut(&mut accounts, &session.account)?;

        let removed = account.credentials.len();
        account.credentials.clear();
        self.store.save(&accounts)?;

        info!(removed, "cleared all credentials");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Crate-internal helpers
    // ------------------------------------------------------------------

    /// The session key, for bundle encryption.
    pub(crate) fn key(&self) -> Result<&VaultKey> {
        Ok(&self.session()?.key)
    }

    fn session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(SecretBookError::NotLoggedIn)
    }

    fn account_of<'a>(accounts: &'a Accounts, name: &str) -> Result<&'a Account> {
        accounts.get(name).ok_or(SecretBookError::InvalidCredentials)
    }

    fn account_of_mut<'a>(accounts: &'a mut Accounts, name: &str) -> Result<&'a mut Account> {
        accounts
            .get_mut(name)
            .ok_or(SecretBookError::InvalidCredentials)
    }

    fn seal_record(key: &VaultKey, record: &CredentialRecord) -> Result<String> {
        let plaintext = Zeroizing::new(
            serde_json::to_vec(record)
                .map_err(|e| SecretBookError::SerializationError(format!("credential: {e}")))?,
        );
        encrypt(key, &plaintext)
    }

    fn open_entry(key: &VaultKey, stored: &EncryptedCredential) -> Result<CredentialEntry> {
        let plaintext = Zeroizing::new(decrypt(key, &stored.ciphertext)?);
        let record: CredentialRecord =
            serde_json::from_slice(&plaintext).map_err(|_| SecretBookError::DecryptionFailed)?;

        Ok(CredentialEntry {
            id: stored.id,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            record,
        })
    }
}
