//! Cryptographic primitives for SecretBook.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 account key derivation (`kdf`)
//! - The zeroizing `VaultKey` wrapper (`keys`)
//! - AES-256-GCM encryption into printable tokens (`encryption`)
//! - Login-secret hashing and verification (`password`)

pub mod encryption;
pub mod kdf;
pub mod keys;
pub mod password;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{derive_key, encrypt, decrypt, ...};
pub use encryption::{decrypt, encrypt};
pub use kdf::derive_key;
pub use keys::VaultKey;
pub use password::{hash_secret, verify_secret};
