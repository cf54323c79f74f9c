//! Exporting secrets into files.
//!
//! An [`Exporter`] reconciles a set of plaintext secrets against a target
//! file and reports, per key, whether it would be added, updated or left
//! alone. The resulting [`Preview`] carries the exact content a commit
//! writes, so a dry run and a real run never disagree.
//!
//! Exporters are looked up by format name in a [`Registry`] handed to the
//! application at construction time.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::debug;

use crate::core::constants;
use crate::error::{ExportError, Result};

mod env;
mod write;

pub(crate) use env::check_key;
pub use env::{escape_value, unescape_value, upsert, EnvDocument, EnvExporter, UpsertOutcome};

/// Plaintext secrets keyed by name, in sorted order.
pub type Secrets = BTreeMap<String, String>;

/// How the target file is treated on commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStrategy {
    /// Refuse if the target already exists.
    Create,
    /// Replace the target wholesale.
    Overwrite,
    /// Edit the existing target in place, adding new keys at the end.
    Append,
}

/// Options controlling a single export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Target file.
    pub path: PathBuf,
    /// Registry key of the exporter to use.
    pub format: String,
    /// Overwrite an existing file, or update differing keys when appending.
    pub force: bool,
    /// Merge into an existing file instead of replacing it.
    pub append: bool,
    /// Compute the preview only.
    pub dry_run: bool,
    /// Copy the existing target aside before replacing it.
    pub backup: bool,
    /// Directory for backups; defaults to the target's directory.
    pub backup_dir: Option<PathBuf>,
    /// Only keys matching one of these patterns are exported.
    pub include: Vec<String>,
    /// Keys matching any of these patterns are dropped.
    pub exclude: Vec<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from(constants::ENV_FILE),
            format: constants::DEFAULT_FORMAT.to_string(),
            force: false,
            append: false,
            dry_run: false,
            backup: false,
            backup_dir: None,
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl ExportOptions {
    /// Refuse to create over an existing file.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::TargetExists` in create mode when `path`
    /// exists.
    pub fn check_target(&self) -> Result<()> {
        if self.strategy() == WriteStrategy::Create && self.path.exists() {
            return Err(ExportError::TargetExists(self.path.clone()).into());
        }
        Ok(())
    }

    /// The write strategy implied by `append` and `force`.
    pub fn strategy(&self) -> WriteStrategy {
        if self.append {
            WriteStrategy::Append
        } else if self.force {
            WriteStrategy::Overwrite
        } else {
            WriteStrategy::Create
        }
    }
}

/// Outcome of reconciling secrets against a target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    /// Keys absent from the target.
    pub new: Vec<String>,
    /// Keys whose value will be replaced.
    pub updated: Vec<String>,
    /// Keys left as they are.
    pub skipped: Vec<String>,
    /// Exact content a commit writes.
    pub content: String,
    /// Whether `content` is an edit of an existing file.
    pub(crate) edit: bool,
}

impl Preview {
    /// Whether committing would change anything.
    pub fn has_changes(&self) -> bool {
        !self.new.is_empty() || !self.updated.is_empty()
    }

    /// Number of keys that end up written.
    pub fn written(&self) -> usize {
        self.new.len() + self.updated.len()
    }

    /// `"<n> new, <n> updates, <n> skipped"`.
    pub fn summary(&self) -> String {
        format!(
            "{} new, {} updates, {} skipped",
            self.new.len(),
            self.updated.len(),
            self.skipped.len()
        )
    }
}

/// A file format secrets can be exported to.
pub trait Exporter {
    /// Registry key, e.g. `env`.
    fn format(&self) -> &'static str;

    /// Reconcile `secrets` against the target without touching disk.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::InvalidKey` or `ExportError::UnsupportedValue`
    /// for secrets the format cannot represent, or an I/O error if the
    /// existing target cannot be read.
    fn preview(&self, secrets: &Secrets, opts: &ExportOptions) -> Result<Preview>;

    /// Write a preview produced by [`Exporter::preview`] with the same
    /// options.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::TargetExists` when creating over an existing
    /// file, or `ExportError::Write`/`ExportError::Backup` on I/O failure.
    fn commit(&self, preview: &Preview, opts: &ExportOptions) -> Result<()>;

    /// Preview, then commit unless `opts.dry_run` is set.
    ///
    /// A dry run is refused exactly when the real write would be.
    fn export(&self, secrets: &Secrets, opts: &ExportOptions) -> Result<Preview> {
        opts.check_target()?;
        let preview = self.preview(secrets, opts)?;
        debug!(
            format = self.format(),
            path = %opts.path.display(),
            dry_run = opts.dry_run,
            summary = %preview.summary(),
            "export reconciled"
        );

        if !opts.dry_run {
            self.commit(&preview, opts)?;
        }
        Ok(preview)
    }
}

/// Exporters by format name.
pub struct Registry {
    exporters: BTreeMap<&'static str, Box<dyn Exporter>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            exporters: BTreeMap::new(),
        }
    }

    /// A registry with every built-in format.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(EnvExporter::new()));
        registry
    }

    /// Add (or replace) an exporter under its own format name.
    pub fn register(&mut self, exporter: Box<dyn Exporter>) {
        self.exporters.insert(exporter.format(), exporter);
    }

    /// Look up an exporter.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::UnknownFormat` listing the known formats.
    pub fn get(&self, format: &str) -> Result<&dyn Exporter> {
        self.exporters
            .get(format)
            .map(|e| e.as_ref())
            .ok_or_else(|| {
                ExportError::UnknownFormat {
                    format: format.to_string(),
                    known: self.formats().join(", "),
                }
                .into()
            })
    }

    /// Registered format names, sorted.
    pub fn formats(&self) -> Vec<&'static str> {
        self.exporters.keys().copied().collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Keep the secrets whose names pass the include/exclude filters.
pub fn filter_secrets(secrets: Secrets, include: &[String], exclude: &[String]) -> Secrets {
    secrets
        .into_iter()
        .filter(|(key, _)| matches_filters(key, include, exclude))
        .collect()
}

/// Include patterns are OR'd (and only apply when non-empty); any
/// matching exclude pattern then rejects the key.
pub fn matches_filters(key: &str, include: &[String], exclude: &[String]) -> bool {
    if !include.is_empty() && !include.iter().any(|p| match_pattern(key, p)) {
        return false;
    }
    !exclude.iter().any(|p| match_pattern(key, p))
}

/// Exact match, `PREFIX*` or `*SUFFIX`.
pub fn match_pattern(key: &str, pattern: &str) -> bool {
    if key == pattern {
        return true;
    }
    if let Some(prefix) = pattern.strip_suffix('*') {
        return key.starts_with(prefix);
    }
    if let Some(suffix) = pattern.strip_prefix('*') {
        return key.ends_with(suffix);
    }
    false
}
