//! Vault export.

use tracing::debug;

use super::App;
use crate::core::export::{filter_secrets, ExportOptions, Preview};
use crate::error::Result;

impl App {
    /// Export a vault through the exporter registered for `opts.format`.
    ///
    /// Secrets are decrypted, filtered by the include/exclude patterns and
    /// reconciled against the target. The target is written unless
    /// `opts.dry_run` is set. The returned preview describes what was (or
    /// would be) written.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::UnknownFormat` before anything is decrypted,
    /// then any store, cipher or export error.
    pub fn export(&self, vault: &str, opts: &ExportOptions) -> Result<Preview> {
        let exporter = self.registry.get(&opts.format)?;

        let secrets = filter_secrets(self.all_secrets(vault)?, &opts.include, &opts.exclude);
        debug!(vault, format = exporter.format(), candidates = secrets.len(), "exporting");

        exporter.export(&secrets, opts)
    }
}
