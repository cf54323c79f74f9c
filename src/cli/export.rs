//! Export command - write a vault into a `.env` file.

use crate::cli::output;
use crate::core::app::App;
use crate::core::export::{ExportOptions, Preview};
use crate::error::Result;

/// Export a vault, or preview the export with `--dry-run`.
pub fn execute(app: &App, vault: &str, opts: &ExportOptions) -> Result<()> {
    let preview = app.export(vault, opts)?;
    let target = opts.path.display().to_string();

    if opts.dry_run {
        print_dry_run(&preview, &target);
        return Ok(());
    }

    if !opts.append {
        output::success(&format!(
            "Exported {} secrets from '{}' to {}",
            preview.written(),
            vault,
            output::path(&target)
        ));
    } else if !preview.has_changes() {
        output::dimmed(&format!(
            "No changes to {} (all keys already present)",
            target
        ));
    } else if preview.skipped.is_empty() {
        output::success(&format!(
            "Appended {} secrets to {}",
            preview.written(),
            output::path(&target)
        ));
    } else {
        output::success(&format!(
            "Appended {} secrets to {} (skipped {} already present)",
            preview.written(),
            output::path(&target),
            preview.skipped.len()
        ));
    }
    Ok(())
}

fn print_dry_run(preview: &Preview, target: &str) {
    output::warn("DRY RUN - No files will be modified");
    println!();

    if !preview.new.is_empty() {
        output::header(&format!("Would write to {}:", target));
        for key in &preview.new {
            output::change('+', key);
        }
    }
    if !preview.updated.is_empty() {
        output::header(&format!("Would update in {}:", target));
        for key in &preview.updated {
            output::change('~', key);
        }
    }
    if !preview.skipped.is_empty() {
        output::header("Would skip (already exist):");
        for key in &preview.skipped {
            output::change('-', key);
        }
    }

    println!();
    output::raw(&format!("Summary: {}", preview.summary()));
}
