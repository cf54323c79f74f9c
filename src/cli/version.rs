//! Version command.

use crate::cli::output;
use crate::error::Result;

/// Print the version.
pub fn execute() -> Result<()> {
    output::raw(&format!("veil version {}", env!("CARGO_PKG_VERSION")));
    Ok(())
}
