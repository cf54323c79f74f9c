//! SQLite-backed secret storage.

use std::fs;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::{Cursor, Paged, SecretRef, Store};
use crate::error::{Error, Result, StoreError};

/// Rows fetched per page by the listing cursors.
const PAGE_SIZE: usize = 64;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS secrets (
    vault TEXT NOT NULL,
    name  TEXT NOT NULL,
    value TEXT NOT NULL,
    PRIMARY KEY (vault, name)
);";

fn query_err(e: rusqlite::Error) -> Error {
    StoreError::Query(e).into()
}

/// Secret store in a single SQLite database file.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    ///
    /// Missing parent directories are created with mode `0700` and the
    /// database file is restricted to `0600` (Unix only).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Open` if the database cannot be opened, or an
    /// I/O error if the directory cannot be created.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !dir.exists() {
                fs::create_dir_all(dir)?;

                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
                }
            }
        }

        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }

        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open a throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(query_err)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA).map_err(query_err)
    }
}

/// Translate a `*`/`?` glob into a LIKE pattern with `\` as the escape.
fn like_pattern(glob: &str) -> String {
    let mut out = String::with_capacity(glob.len());

    for ch in glob.chars() {
        match ch {
            '*' => out.push('%'),
            '?' => out.push('_'),
            '%' | '_' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }

    out
}

impl Store for SqliteStore {
    fn save(&self, vault: &str, name: &str, value: &str) -> Result<()> {
        debug!(vault, name, "saving secret");
        self.conn
            .execute(
                "INSERT OR REPLACE INTO secrets (vault, name, value) VALUES (?1, ?2, ?3)",
                params![vault, name, value],
            )
            .map_err(query_err)?;
        Ok(())
    }

    fn get(&self, vault: &str, name: &str) -> Result<String> {
        self.conn
            .query_row(
                "SELECT value FROM secrets WHERE vault = ?1 AND name = ?2",
                params![vault, name],
                |row| row.get(0),
            )
            .optional()
            .map_err(query_err)?
            .ok_or_else(|| {
                StoreError::NotFound {
                    vault: vault.to_string(),
                    name: name.to_string(),
                }
                .into()
            })
    }

    fn delete(&self, vault: &str, name: &str) -> Result<()> {
        debug!(vault, name, "deleting secret");
        let deleted = self
            .conn
            .execute(
                "DELETE FROM secrets WHERE vault = ?1 AND name = ?2",
                params![vault, name],
            )
            .map_err(query_err)?;

        if deleted == 0 {
            return Err(StoreError::NotFound {
                vault: vault.to_string(),
                name: name.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn list<'a>(&'a self, vault: &str) -> Cursor<'a, String> {
        let vault = vault.to_string();
        Box::new(Paged::new(PAGE_SIZE, move |last: Option<&String>| {
            let mut stmt = self
                .conn
                .prepare_cached(
                    "SELECT name FROM secrets
                     WHERE vault = ?1 AND (?2 IS NULL OR name > ?2)
                     ORDER BY name ASC LIMIT ?3",
                )
                .map_err(query_err)?;
            let rows = stmt
                .query_map(params![vault, last, PAGE_SIZE as i64], |row| row.get(0))
                .map_err(query_err)?;
            rows.collect::<rusqlite::Result<Vec<String>>>()
                .map_err(query_err)
        }))
    }

    fn list_vaults(&self) -> Cursor<'_, String> {
        Box::new(Paged::new(PAGE_SIZE, move |last: Option<&String>| {
            let mut stmt = self
                .conn
                .prepare_cached(
                    "SELECT DISTINCT vault FROM secrets
                     WHERE ?1 IS NULL OR vault > ?1
                     ORDER BY vault ASC LIMIT ?2",
                )
                .map_err(query_err)?;
            let rows = stmt
                .query_map(params![last, PAGE_SIZE as i64], |row| row.get(0))
                .map_err(query_err)?;
            rows.collect::<rusqlite::Result<Vec<String>>>()
                .map_err(query_err)
        }))
    }

    fn search<'a>(&'a self, pattern: &str) -> Cursor<'a, SecretRef> {
        let like = like_pattern(pattern);
        debug!(pattern, like = %like, "searching secrets");

        Box::new(Paged::new(PAGE_SIZE, move |last: Option<&SecretRef>| {
            let mut stmt = self
                .conn
                .prepare_cached(
                    r"SELECT vault, name FROM secrets
                      WHERE LOWER(name) LIKE LOWER(?1) ESCAPE '\'
                        AND (?2 IS NULL OR vault > ?2 OR (vault = ?2 AND name > ?3))
                      ORDER BY vault ASC, name ASC LIMIT ?4",
                )
                .map_err(query_err)?;
            let rows = stmt
                .query_map(
                    params![
                        like,
                        last.map(|r| r.vault.as_str()),
                        last.map(|r| r.name.as_str()),
                        PAGE_SIZE as i64
                    ],
                    |row| {
                        Ok(SecretRef {
                            vault: row.get(0)?,
                            name: row.get(1)?,
                        })
                    },
                )
                .map_err(query_err)?;
            rows.collect::<rusqlite::Result<Vec<SecretRef>>>()
                .map_err(query_err)
        }))
    }

    fn nuke(&self) -> Result<()> {
        debug!("deleting all secrets");
        self.conn
            .execute("DELETE FROM secrets", [])
            .map_err(query_err)?;

        if let Err(e) = self.conn.execute_batch("VACUUM") {
            debug!(error = %e, "vacuum after nuke failed");
        }
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.conn.close().map_err(|(_, e)| query_err(e))
    }
}
