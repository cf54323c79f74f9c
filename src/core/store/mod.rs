//! Encrypted secret storage.
//!
//! Stores opaque encrypted strings keyed by `(vault, name)`. The store
//! never sees plaintext.
//!
//! ## Adding a New Storage Backend
//!
//! 1. Implement the `Store` trait
//! 2. Add the implementation in a new file
//! 3. Wire it into [`open`]
//!
//! ## Example
//!
//! ```ignore
//! struct Remote { /* ... */ }
//!
//! impl Store for Remote {
//!     fn save(&self, vault: &str, name: &str, value: &str) -> Result<()> {
//!         // Upsert remotely
//!     }
//!     // ...
//! }
//! ```

use std::collections::VecDeque;

use tracing::debug;

use crate::core::config::{Config, StoreKind};
use crate::error::Result;

mod sqlite;

pub use sqlite::SqliteStore;

/// A lazy, fallible cursor over store results.
///
/// Callers may stop consuming at any point; remaining rows are never
/// fetched.
pub type Cursor<'a, T> = Box<dyn Iterator<Item = Result<T>> + 'a>;

/// A reference to a stored secret, as returned by search.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SecretRef {
    pub vault: String,
    pub name: String,
}

impl std::fmt::Display for SecretRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.vault, self.name)
    }
}

/// Secret storage trait.
///
/// Values are the encoded ciphertext produced by the cipher; the store
/// treats them as opaque strings.
pub trait Store {
    /// Insert or replace the value stored under `(vault, name)`.
    fn save(&self, vault: &str, name: &str, value: &str) -> Result<()>;

    /// Fetch the value stored under `(vault, name)`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if nothing is stored there.
    fn get(&self, vault: &str, name: &str) -> Result<String>;

    /// Delete the value stored under `(vault, name)`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if nothing was deleted.
    fn delete(&self, vault: &str, name: &str) -> Result<()>;

    /// Names stored in a vault, in ascending order.
    fn list<'a>(&'a self, vault: &str) -> Cursor<'a, String>;

    /// Distinct vault names, in ascending order.
    fn list_vaults(&self) -> Cursor<'_, String>;

    /// Secrets whose name matches a glob pattern (`*` and `?`),
    /// case-insensitively, ordered by vault then name.
    fn search<'a>(&'a self, pattern: &str) -> Cursor<'a, SecretRef>;

    /// Delete every stored secret.
    fn nuke(&self) -> Result<()>;

    /// Release the underlying resources.
    fn close(self: Box<Self>) -> Result<()>;
}

/// Open the store selected by the configuration.
///
/// # Errors
///
/// Returns `StoreError::Open` if the backend cannot be opened.
pub fn open(config: &Config) -> Result<Box<dyn Store>> {
    match config.store() {
        StoreKind::Sqlite => {
            debug!(path = %config.db_path().display(), "opening sqlite store");
            Ok(Box::new(SqliteStore::open(config.db_path())?))
        }
    }
}

/// Iterator that pulls results one page at a time.
///
/// `fetch` receives the last item yielded so far (if any) and returns
/// the next page. A page shorter than `page_size` ends the iteration.
pub(crate) struct Paged<'a, T> {
    fetch: Box<dyn FnMut(Option<&T>) -> Result<Vec<T>> + 'a>,
    page_size: usize,
    buffer: VecDeque<T>,
    last: Option<T>,
    exhausted: bool,
}

impl<'a, T: Clone> Paged<'a, T> {
    pub(crate) fn new(
        page_size: usize,
        fetch: impl FnMut(Option<&T>) -> Result<Vec<T>> + 'a,
    ) -> Self {
        Self {
            fetch: Box::new(fetch),
            page_size,
            buffer: VecDeque::new(),
            last: None,
            exhausted: false,
        }
    }
}

impl<T: Clone> Iterator for Paged<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_empty() && !self.exhausted {
            match (self.fetch)(self.last.as_ref()) {
                Ok(page) => {
                    self.exhausted = page.len() < self.page_size;
                    self.buffer.extend(page);
                }
                Err(e) => {
                    self.exhausted = true;
                    return Some(Err(e));
                }
            }
        }

        let item = self.buffer.pop_front()?;
        self.last = Some(item.clone());
        Some(Ok(item))
    }
}
