//! Secret operations.
//!
//! CRUD over encrypted secrets, plus listing and search.

use tracing::debug;
use zeroize::Zeroizing;

use super::App;
use crate::core::export::Secrets;
use crate::core::store::{Cursor, SecretRef};
use crate::core::validation::{require, validate_ref};
use crate::error::Result;

impl App {
    /// Encrypt and store a secret, replacing any previous value.
    ///
    /// # Arguments
    ///
    /// * `vault` - Namespace to store under
    /// * `name` - Secret name within the vault
    /// * `value` - Plaintext secret value
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Empty` for a blank vault or name.
    pub fn set(&self, vault: &str, name: &str, value: &str) -> Result<()> {
        validate_ref(vault, name)?;

        let encrypted = self.cipher.encrypt(value)?;
        self.store.save(vault, name, &encrypted)?;

        debug!(vault, name, "secret stored");
        Ok(())
    }

    /// Fetch and decrypt a secret.
    ///
    /// # Returns
    ///
    /// The plaintext wrapped in `Zeroizing` for secure memory cleanup.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if nothing is stored there, or a
    /// `CipherError` if the stored value does not decrypt.
    pub fn get(&self, vault: &str, name: &str) -> Result<Zeroizing<String>> {
        validate_ref(vault, name)?;

        let encrypted = self.store.get(vault, name)?;
        Ok(Zeroizing::new(self.cipher.decrypt(&encrypted)?))
    }

    /// Remove a secret.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if nothing was stored there.
    pub fn delete(&self, vault: &str, name: &str) -> Result<()> {
        validate_ref(vault, name)?;
        self.store.delete(vault, name)
    }

    /// Secret names in a vault, in order.
    pub fn list<'a>(&'a self, vault: &str) -> Cursor<'a, String> {
        self.store.list(vault)
    }

    /// Vault names, in order.
    pub fn list_vaults(&self) -> Cursor<'_, String> {
        self.store.list_vaults()
    }

    /// All secrets whose name matches `pattern` (`*` and `?` wildcards).
    pub fn search(&self, pattern: &str) -> Result<Vec<SecretRef>> {
        require("pattern", pattern)?;
        self.store.search(pattern).collect()
    }

    /// Every secret in a vault, decrypted.
    ///
    /// # Errors
    ///
    /// Fails on the first secret that cannot be read or decrypted.
    pub fn all_secrets(&self, vault: &str) -> Result<Secrets> {
        require("vault", vault)?;

        let mut secrets = Secrets::new();
        for name in self.store.list(vault) {
            let name = name?;
            let encrypted = self.store.get(vault, &name)?;
            let value = self.cipher.decrypt(&encrypted)?;
            secrets.insert(name, value);
        }

        debug!(vault, count = secrets.len(), "decrypted vault");
        Ok(secrets)
    }
}
