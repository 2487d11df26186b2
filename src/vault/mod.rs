//! Vault module: encrypted credential storage.
//!
//! This module provides:
//! - Plaintext `CredentialRecord`/`CredentialEntry` types and filters (`record`)
//! - On-disk `Account` and `EncryptedCredential` types (`account`)
//! - The JSON account document with atomic saves (`store`)
//! - `CredentialRepository` for per-account CRUD (`repository`)
//! - Lenient reading of stored timestamps (`timestamp`)

pub mod account;
pub mod record;
pub mod repository;
pub mod store;
pub mod timestamp;

// Re-export the most commonly used items.
pub use account::{Account, EncryptedCredential};
pub use record::{categories, CategoryFilter, CredentialEntry, CredentialFilter, CredentialRecord};
pub use repository::CredentialRepository;
pub use store::{AccountStore, Accounts};
