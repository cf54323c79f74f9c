//! Generate command - create a secret, store it, optionally mirror it
//! into a `.env` file.

use std::path::PathBuf;

use crate::cli::{output, GeneratorArgs};
use crate::core::app::{App, EnvTarget};
use crate::core::export::UpsertOutcome;
use crate::error::{ExportError, Result};

/// Generate and store a secret.
pub fn execute(
    app: &App,
    vault: &str,
    name: &str,
    args: &GeneratorArgs,
    to_env: Option<PathBuf>,
    force: bool,
) -> Result<()> {
    let opts = args.options()?;
    let target = to_env.map(|path| EnvTarget { path, force });

    let generated = app.generate(vault, name, &opts, target.as_ref())?;

    output::raw(&format!("Generated secret: {}", generated.value.as_str()));
    output::success(&format!("Stored in {}/{}", vault, output::key(name)));

    if let (Some(target), Some(outcome)) = (&target, generated.env) {
        let path = target.path.display().to_string();
        match outcome {
            UpsertOutcome::Added => {
                output::success(&format!("Appended {} to {}", name, output::path(&path)))
            }
            UpsertOutcome::Updated => {
                output::success(&format!("Updated {} in {}", name, output::path(&path)))
            }
            UpsertOutcome::Skipped => output::warn(
                &ExportError::KeyExists {
                    key: name.to_string(),
                    path: target.path.clone(),
                }
                .to_string(),
            ),
        }
    }
    Ok(())
}
