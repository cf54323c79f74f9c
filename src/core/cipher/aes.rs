//! AES-256-GCM backend.
//!
//! Every call to `encrypt` draws a new 96-bit nonce from the OS RNG and
//! prepends it to the sealed output. No associated data is bound.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use tracing::trace;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::Cipher;
use crate::error::{CipherError, Result};

/// Master key size in bytes.
pub const KEY_SIZE: usize = 32;

/// GCM nonce size in bytes.
pub const NONCE_SIZE: usize = 12;

/// GCM authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// A 256-bit master key, wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey([u8; KEY_SIZE]);

impl MasterKey {
    /// Decode a master key from its hex representation.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidKeyFormat` if the string is not hex,
    /// or `CipherError::InvalidKeyLength` if it does not decode to
    /// exactly 32 bytes.
    pub fn from_hex(key_hex: &str) -> Result<Self> {
        let mut decoded =
            hex::decode(key_hex).map_err(|e| CipherError::InvalidKeyFormat(e.to_string()))?;

        if decoded.len() != KEY_SIZE {
            let len = decoded.len();
            decoded.zeroize();
            return Err(CipherError::InvalidKeyLength(len).into());
        }

        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(&decoded);
        decoded.zeroize();
        Ok(Self(key))
    }

    fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterKey(<redacted>)")
    }
}

/// Authenticated encryption engine bound to one master key.
#[derive(Debug, Clone)]
pub struct CryptoEngine {
    key: MasterKey,
}

impl CryptoEngine {
    /// Create an engine from a 64-character hex master key.
    ///
    /// # Errors
    ///
    /// See [`MasterKey::from_hex`].
    pub fn new(key_hex: &str) -> Result<Self> {
        Ok(Self::from_key(MasterKey::from_hex(key_hex)?))
    }

    /// Create an engine from an already decoded key.
    pub fn from_key(key: MasterKey) -> Self {
        Self { key }
    }

    fn aead(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(self.key.as_bytes()))
    }
}

impl Cipher for CryptoEngine {
    fn name(&self) -> &'static str {
        "aes-256-gcm"
    }

    fn encrypt(&self, plaintext: &str) -> Result<String> {
        trace!(plaintext_len = plaintext.len(), "encrypting");

        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let sealed = self
            .aead()
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| CipherError::EncryptionFailed)?;

        let mut record = Vec::with_capacity(NONCE_SIZE + sealed.len());
        record.extend_from_slice(&nonce);
        record.extend_from_slice(&sealed);

        trace!(record_len = record.len(), "encrypted");
        Ok(hex::encode(record))
    }

    fn decrypt(&self, encoded: &str) -> Result<String> {
        trace!(encoded_len = encoded.len(), "decrypting");

        let record = hex::decode(encoded).map_err(|_| CipherError::HexDecode)?;
        if record.len() < NONCE_SIZE {
            return Err(CipherError::CiphertextTooShort.into());
        }

        let (nonce, sealed) = record.split_at(NONCE_SIZE);
        let plaintext = self
            .aead()
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(|_| CipherError::DecryptionFailed)?;

        trace!(plaintext_len = plaintext.len(), "decrypted");
        String::from_utf8(plaintext).map_err(|_| CipherError::DecryptionFailed.into())
    }
}
