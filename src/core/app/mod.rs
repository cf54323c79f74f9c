//! The primary interface for veil operations.
//!
//! `App` ties the store, the cipher and the export registry together.
//! Everything it hands back is plaintext; everything it hands the store is
//! ciphertext.

mod export;
mod generate;
mod secrets;

pub use generate::{EnvTarget, Generated};

use crate::core::cipher::Cipher;
use crate::core::export::Registry;
use crate::core::store::Store;
use crate::error::Result;

/// The primary interface for veil operations.
pub struct App {
    store: Box<dyn Store>,
    cipher: Box<dyn Cipher>,
    registry: Registry,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("cipher", &self.cipher.name())
            .field("formats", &self.registry.formats())
            .finish_non_exhaustive()
    }
}

impl App {
    /// Build an application from its collaborators.
    pub fn new(store: Box<dyn Store>, cipher: Box<dyn Cipher>, registry: Registry) -> Self {
        Self {
            store,
            cipher,
            registry,
        }
    }

    /// Delete every stored secret.
    pub fn reset(&self) -> Result<()> {
        self.store.nuke()
    }

    /// Release the store.
    pub fn close(self) -> Result<()> {
        self.store.close()
    }
}
