//! Atomic file replacement with optional backups.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ExportError, Result};

/// Where backups of a replaced file go.
#[derive(Debug, Clone)]
pub(crate) struct BackupPolicy<'a> {
    pub dir: Option<&'a Path>,
    pub at: DateTime<Utc>,
}

/// New file content written to a temporary sibling, not yet visible at
/// the target path.
///
/// Dropping a staged write discards the temporary file and leaves the
/// target untouched.
pub(crate) struct StagedWrite {
    target: PathBuf,
    temp: NamedTempFile,
}

impl StagedWrite {
    /// Write `content` into a `0600` temporary file next to `target`.
    pub(crate) fn stage(target: &Path, content: &str) -> Result<Self> {
        let write_err = |source| ExportError::Write {
            path: target.to_path_buf(),
            source,
        };

        let dir = match target.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut temp = tempfile::Builder::new()
            .prefix(".veil-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(write_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            temp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(write_err)?;
        }

        temp.write_all(content.as_bytes()).map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;

        debug!(target = %target.display(), temp = %temp.path().display(), "staged write");
        Ok(Self {
            target: target.to_path_buf(),
            temp,
        })
    }

    /// Back up the current target if asked to, then rename the staged file
    /// over it.
    ///
    /// Returns the backup path, if one was written.
    pub(crate) fn commit(self, backup: Option<&BackupPolicy<'_>>) -> Result<Option<PathBuf>> {
        let backup_path = match backup {
            Some(policy) if self.target.exists() => Some(backup_file(&self.target, policy)?),
            _ => None,
        };

        self.temp
            .persist(&self.target)
            .map_err(|e| ExportError::Write {
                path: self.target.clone(),
                source: e.error,
            })?;

        debug!(target = %self.target.display(), "committed write");
        Ok(backup_path)
    }
}

/// Replace `target` with `content` atomically.
pub(crate) fn write_atomic(
    target: &Path,
    content: &str,
    backup: Option<&BackupPolicy<'_>>,
) -> Result<Option<PathBuf>> {
    StagedWrite::stage(target, content)?.commit(backup)
}

/// Copy `target` to `<name>.backup.<YYYYMMDD-HHMMSS>` in the backup
/// directory, or next to the target.
fn backup_file(target: &Path, policy: &BackupPolicy<'_>) -> Result<PathBuf> {
    let backup_err = |source| ExportError::Backup {
        path: target.to_path_buf(),
        source,
    };

    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".env".to_string());
    let backup_name = format!("{}.backup.{}", name, policy.at.format("%Y%m%d-%H%M%S"));

    let dir = match policy.dir {
        Some(dir) => {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(backup_err)?;

                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    fs::set_permissions(dir, fs::Permissions::from_mode(0o700))
                        .map_err(backup_err)?;
                }
            }
            dir.to_path_buf()
        }
        None => target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    let path = dir.join(backup_name);
    let data = fs::read(target).map_err(backup_err)?;
    fs::write(&path, data).map_err(backup_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).map_err(backup_err)?;
    }

    debug!(backup = %path.display(), "backup written");
    Ok(path)
}
