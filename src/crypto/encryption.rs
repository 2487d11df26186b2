//! AES-256-GCM authenticated encryption into printable tokens.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  The combined buffer is then encoded
//! as URL-safe base64 so it can sit inside a JSON document.
//!
//! Layout of the decoded token:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::URL_SAFE as BASE64;
use base64::Engine;

use super::keys::VaultKey;
use crate::errors::{Result, SecretBookError};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
const TAG_LEN: usize = 16;

/// Encrypt `plaintext` and return it as a base64 token.
pub fn encrypt(key: &VaultKey, plaintext: &[u8]) -> Result<String> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));

    // Generate a random 12-byte nonce.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    // Encrypt and authenticate the plaintext.
    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| SecretBookError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(output))
}

/// Decrypt a token produced by `encrypt`.
///
/// A malformed token, a failed tag check and a wrong key all yield the
/// same `DecryptionFailed` error.
pub fn decrypt(key: &VaultKey, token: &str) -> Result<Vec<u8>> {
    let raw = BASE64
        .decode(token.trim())
        .map_err(|_| SecretBookError::DecryptionFailed)?;

    if raw.len() < NONCE_LEN + TAG_LEN {
        return Err(SecretBookError::DecryptionFailed);
    }

    let (nonce_bytes, ciphertext) = raw.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| SecretBookError::DecryptionFailed)
}
