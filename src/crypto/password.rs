//! Login-secret hashing.
//!
//! The stored digest is SHA-256 of the secret, hex encoded.  It is used
//! only to authenticate a login and never as key material.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Hash a login secret for storage.
pub fn hash_secret(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}

/// Check a login secret against a stored digest.
pub fn verify_secret(secret: &str, expected_hash: &str) -> bool {
    let actual = hash_secret(secret);

    // Constant-time comparison to avoid timing side channels.
    actual.as_bytes().ct_eq(expected_hash.as_bytes()).into()
}
