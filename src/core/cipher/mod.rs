//! Cryptographic operations.
//!
//! Secret values are sealed with AES-256-GCM under a single 32-byte
//! master key. The stored form of every secret is
//! `hex(nonce || ciphertext || tag)`.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

use rand::RngCore;

use crate::error::Result;

mod aes;

pub use aes::{CryptoEngine, MasterKey, KEY_SIZE, NONCE_SIZE, TAG_SIZE};

/// Symmetric encryption backend.
///
/// Implementations own their key; callers only see plaintext strings
/// going in and encoded strings coming out.
pub trait Cipher {
    /// Encrypt a plaintext string into its stored encoding.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::EncryptionFailed` if sealing fails.
    fn encrypt(&self, plaintext: &str) -> Result<String>;

    /// Decrypt a stored encoding back to plaintext.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::HexDecode`, `CipherError::CiphertextTooShort`
    /// or `CipherError::DecryptionFailed`.
    fn decrypt(&self, encoded: &str) -> Result<String>;

    /// Backend name for display/logging.
    fn name(&self) -> &'static str;
}

/// Generate a fresh random master key as 64 lowercase hex characters.
pub fn generate_key() -> String {
    let mut key = zeroize::Zeroizing::new([0u8; KEY_SIZE]);
    rand::rngs::OsRng.fill_bytes(key.as_mut());
    hex::encode(key.as_ref())
}
