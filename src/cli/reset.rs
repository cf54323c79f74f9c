//! Reset command - wipe the database.

use std::io::{self, IsTerminal};

use dialoguer::Input;
use tracing::info;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::store;
use crate::error::Result;

/// Delete every stored secret after confirmation.
///
/// Needs the store but not the master key, so a lost key can still be
/// recovered from by starting over.
pub fn execute(yes: bool) -> Result<()> {
    let config = Config::load()?;

    if !yes && !confirm(&config)? {
        output::dimmed("Aborted.");
        return Ok(());
    }

    let store = store::open(&config)?;
    store.nuke()?;
    store.close()?;
    info!(path = %config.db_path().display(), "database wiped");

    output::success("Database wiped successfully.");
    output::hint("run: veil init to start over");
    Ok(())
}

fn confirm(config: &Config) -> Result<bool> {
    output::warn(&format!(
        "This will permanently DELETE ALL SECRETS in {}.",
        output::path(config.db_path().display())
    ));
    output::warn("Ensure you have backups before proceeding. This cannot be undone.");

    let answer = if io::stdin().is_terminal() {
        Input::<String>::new()
            .with_prompt("Are you sure? (type 'yes' to confirm)")
            .allow_empty(true)
            .interact_text()?
    } else {
        // Piped confirmation
        println!("Are you sure? (type 'yes' to confirm): ");
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        line
    };

    Ok(answer.trim() == "yes")
}
