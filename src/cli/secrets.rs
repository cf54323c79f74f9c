//! Secret management commands.
//!
//! Implements set, get, delete, list, vaults and search.

use tracing::info;

use crate::cli::output;
use crate::core::app::App;
use crate::error::Result;

/// Store a secret.
pub fn set(app: &App, vault: &str, name: &str, value: &str) -> Result<()> {
    info!(vault, name, "setting secret");
    app.set(vault, name, value)?;
    output::success(&format!("stored {}/{}", vault, output::key(name)));
    Ok(())
}

/// Print a secret value.
pub fn get(app: &App, vault: &str, name: &str) -> Result<()> {
    let value = app.get(vault, name)?;
    // Plain output for scripting - no decoration
    output::raw(value.as_str());
    Ok(())
}

/// Remove a secret.
pub fn delete(app: &App, vault: &str, name: &str) -> Result<()> {
    info!(vault, name, "deleting secret");
    app.delete(vault, name)?;
    output::success(&format!("deleted {}/{}", vault, output::key(name)));
    Ok(())
}

/// List the secret names in a vault.
pub fn list(app: &App, vault: &str, json: bool) -> Result<()> {
    if json {
        let names = app.list(vault).collect::<Result<Vec<_>>>()?;
        output::raw(&serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    let mut count = 0;
    for name in app.list(vault) {
        output::raw(&name?);
        count += 1;
    }
    if count == 0 {
        output::dimmed(&format!("no secrets in '{}'", vault));
    }
    Ok(())
}

/// List every vault.
pub fn vaults(app: &App, json: bool) -> Result<()> {
    if json {
        let vaults = app.list_vaults().collect::<Result<Vec<_>>>()?;
        output::raw(&serde_json::to_string_pretty(&vaults)?);
        return Ok(());
    }

    let mut count = 0;
    for vault in app.list_vaults() {
        output::raw(&vault?);
        count += 1;
    }
    if count == 0 {
        output::dimmed("no vaults yet");
    }
    Ok(())
}

/// Find secrets by name pattern across all vaults.
pub fn search(app: &App, pattern: &str) -> Result<()> {
    let found = app.search(pattern)?;

    if found.is_empty() {
        output::raw("No matches found");
        return Ok(());
    }

    let plural = if found.len() == 1 { "" } else { "es" };
    output::raw(&format!("Found {} match{}:", found.len(), plural));
    for secret in &found {
        output::list_item(&secret.to_string());
    }
    Ok(())
}
