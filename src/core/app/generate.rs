//! Generate-and-store.

use std::path::PathBuf;

use chrono::Utc;
use tracing::debug;
use zeroize::Zeroizing;

use super::App;
use crate::core::export::{check_key, upsert, UpsertOutcome};
use crate::core::generator::{self, GenerateOptions};
use crate::core::validation::validate_ref;
use crate::error::{ExportError, Result};

/// A `.env` file to mirror a generated secret into.
#[derive(Debug, Clone)]
pub struct EnvTarget {
    pub path: PathBuf,
    /// Overwrite the key if it is already in the file.
    pub force: bool,
}

/// Result of [`App::generate`].
#[derive(Debug)]
pub struct Generated {
    pub value: Zeroizing<String>,
    /// What happened in the `.env` file, if one was given.
    pub env: Option<UpsertOutcome>,
}

impl App {
    /// Generate a secret, store it, and optionally write it into an
    /// existing `.env` file under `name`.
    ///
    /// Options and the target file are checked before anything is
    /// generated. When the key is already in the file and `force` is not
    /// set, the secret is still stored and the outcome is
    /// [`UpsertOutcome::Skipped`].
    ///
    /// # Errors
    ///
    /// Returns `ExportError::MissingTarget` if the `.env` file does not
    /// exist, `ExportError::InvalidKey` if `name` cannot be a `.env` key,
    /// or any generation, cipher or store error.
    pub fn generate(
        &self,
        vault: &str,
        name: &str,
        opts: &GenerateOptions,
        to_env: Option<&EnvTarget>,
    ) -> Result<Generated> {
        validate_ref(vault, name)?;

        if let Some(target) = to_env {
            if !target.path.exists() {
                return Err(ExportError::MissingTarget(target.path.clone()).into());
            }
            check_key(name)?;
        }

        let value = Zeroizing::new(generator::generate(opts)?);
        self.set(vault, name, &value)?;
        debug!(vault, name, kind = %opts.kind, "generated secret");

        let env = match to_env {
            Some(target) => {
                let pairs = [(name.to_string(), value.as_str().to_string())];
                let outcomes = upsert(&target.path, &pairs, target.force, Utc::now())?;
                outcomes.into_iter().next()
            }
            None => None,
        };

        Ok(Generated { value, env })
    }
}
