//! Init command - generate a new master key.

use tracing::info;

use crate::cli::{banner, output};
use crate::core::cipher;
use crate::core::config::Config;
use crate::core::constants;
use crate::error::Result;

/// Generate and print a fresh master key.
///
/// Nothing is written: the key only exists in the output.
pub fn execute(no_banner: bool) -> Result<()> {
    if let Ok(config) = Config::load() {
        if config.db_path().exists() {
            output::warn(&format!(
                "a database already exists at {}",
                output::path(config.db_path().display())
            ));
            output::warn("secrets stored under the current key will be UNREADABLE with a new one");
            println!();
        }
    }

    if !no_banner {
        banner::print_banner();
    }

    let key = cipher::generate_key();
    info!("generated master key");

    output::success("generated a new master key");
    println!();
    output::raw(&key);
    println!();
    output::warn("SAVE THIS KEY! If you lose it, your secrets are gone forever.");
    output::dimmed("Export it to your environment:");
    output::raw(&format!("export {}={}", constants::MASTER_KEY_ENV, key));
    Ok(())
}
