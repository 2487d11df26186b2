//! Account key derivation using PBKDF2-HMAC-SHA256.
//!
//! The key is derived from the account *name* with a fixed salt, so the
//! same name always yields the same key on every installation.  The login
//! secret plays no part: changing it never re-keys stored credentials.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroize;

use super::keys::{VaultKey, KEY_LEN};

/// Fixed salt shared by every installation.
const SALT: &[u8] = b"secretbook_salt_2024";

/// Number of PBKDF2 rounds.
pub const ITERATIONS: u32 = 100_000;

/// Derive the 32-byte encryption key for an account.
pub fn derive_key(account_name: &str) -> VaultKey {
    let mut bytes = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(account_name.as_bytes(), SALT, ITERATIONS, &mut bytes);

    let key = VaultKey::new(bytes);
    bytes.zeroize();
    key
}
