//! Veil - a local secrets manager.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use veil::cli::output;
use veil::cli::{execute, Cli};
use veil::core::constants;
use veil::error::Error;

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("veil=debug")
        } else {
            EnvFilter::new("veil=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .init();

    if let Err(e) = execute(cli.command) {
        report(&e);
        std::process::exit(1);
    }
}

fn report(e: &Error) {
    // One message for every decrypt-side failure
    if e.is_decryption() {
        output::error("decryption failed (check your MASTER_KEY)");
        return;
    }

    output::error(&e.to_string());
    if e.is_master_key() {
        output::hint("run: veil init");
    }
}
