//! Command-line interface.

pub mod banner;
pub mod completions;
pub mod export;
pub mod generate;
pub mod init;
pub mod output;
pub mod quick;
pub mod reset;
pub mod secrets;
pub mod version;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::app::App;
use crate::core::cipher::CryptoEngine;
use crate::core::config::Config;
use crate::core::export::Registry;
use crate::core::generator::GenerateOptions;
use crate::core::store;
use crate::error::Result;

/// Veil - a local secrets manager.
#[derive(Parser)]
#[command(
    name = "veil",
    about = "A local secrets manager with .env export",
    version,
    after_help = "Secrets are encrypted with the key in MASTER_KEY. Run `veil init` to create one."
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Generate a new master key
    Init {
        /// Skip ASCII art banner
        #[arg(long)]
        no_banner: bool,
    },

    /// Show version information
    Version,

    /// Delete all secrets and start fresh
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Store a secret
    Set {
        /// Vault name (e.g., production)
        vault: String,
        /// Secret name (e.g., DATABASE_URL)
        name: String,
        /// Secret value
        value: String,
    },

    /// Retrieve a secret
    Get {
        vault: String,
        name: String,
    },

    /// Remove a secret
    Delete {
        vault: String,
        name: String,
    },

    /// List all secret names in a vault
    List {
        vault: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all vaults
    Vaults {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find secrets by name across vaults (`*` and `?` wildcards)
    Search {
        pattern: String,
    },

    /// Generate and store a secret
    Generate {
        vault: String,
        name: String,
        #[command(flatten)]
        generator: GeneratorArgs,
        /// Also write the secret into this existing .env file
        #[arg(long, value_name = "PATH")]
        to_env: Option<PathBuf>,
        /// Overwrite the key if it is already in the .env file
        #[arg(short, long)]
        force: bool,
    },

    /// Export vault secrets to a file
    Export {
        vault: String,
        /// Output file path
        #[arg(long, value_name = "PATH", default_value = ".env")]
        to: PathBuf,
        /// Output format
        #[arg(long, default_value = "env")]
        format: String,
        /// Overwrite an existing file, or update differing keys with --append
        #[arg(short, long)]
        force: bool,
        /// Add to an existing file instead of replacing it
        #[arg(long)]
        append: bool,
        /// Preview without writing
        #[arg(long)]
        dry_run: bool,
        /// Back up the existing file before writing
        #[arg(long)]
        backup: bool,
        /// Directory for backups (defaults to the file's directory)
        #[arg(long, value_name = "DIR")]
        backup_dir: Option<PathBuf>,
        /// Only export keys matching this pattern (repeatable)
        #[arg(long, value_name = "PATTERN")]
        include: Vec<String>,
        /// Skip keys matching this pattern (repeatable)
        #[arg(long, value_name = "PATTERN")]
        exclude: Vec<String>,
    },

    /// Generate secrets without storing them
    Quick {
        /// password, apikey, jwt, hex, base64 or uuid (default: password)
        #[arg(value_name = "TYPE")]
        quick_type: Option<String>,
        #[command(flatten)]
        generator: GeneratorArgs,
        /// Number of values to generate (1-100)
        #[arg(short, long, conflicts_with = "to")]
        count: Option<usize>,
        /// Write into this .env file (created if missing)
        #[arg(long, value_name = "PATH")]
        to: Option<PathBuf>,
        /// Key name for --to
        #[arg(long, value_name = "KEY")]
        name: Option<String>,
        /// Overwrite existing keys in the --to file
        #[arg(short, long)]
        force: bool,
        /// Output template with {value}, {type} and {timestamp}
        #[arg(long)]
        template: Option<String>,
        /// Generate every entry of a JSON batch file
        #[arg(long, value_name = "FILE", conflicts_with_all = ["count", "template", "name"])]
        batch: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Generator flags shared by `generate` and `quick`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GeneratorArgs {
    /// Secret type: password, apikey or jwt
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,
    /// Password length (8-128) or API key bytes (1-512)
    #[arg(short, long)]
    pub length: Option<usize>,
    /// Letters and digits only
    #[arg(long)]
    pub no_symbols: bool,
    /// API key format: base64, hex, uuid or uuidv7
    #[arg(long)]
    pub format: Option<String>,
    /// Prefix for API keys (e.g., sk_live_)
    #[arg(long)]
    pub prefix: Option<String>,
    /// JWT secret bits (128-512)
    #[arg(long)]
    pub bits: Option<u32>,
}

impl GeneratorArgs {
    /// Parse the flags into generator options.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::UnknownType` or
    /// `GenerateError::UnsupportedFormat` for unrecognised names.
    pub fn options(&self) -> Result<GenerateOptions> {
        Ok(GenerateOptions {
            kind: self.kind.as_deref().unwrap_or_default().parse()?,
            length: self.length,
            format: self.format.as_deref().map(str::parse).transpose()?,
            prefix: self.prefix.clone(),
            bits: self.bits,
            no_symbols: self.no_symbols,
        })
    }
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command) -> Result<()> {
    use Command::*;

    match command {
        Init { no_banner } => init::execute(no_banner),
        Version => version::execute(),
        Quick {
            quick_type,
            generator,
            count,
            to,
            name,
            force,
            template,
            batch,
        } => quick::execute(quick::Args {
            kind: quick_type,
            generator,
            count,
            to,
            name,
            force,
            template,
            batch,
        }),
        Completions { shell } => completions::execute(shell),
        Reset { yes } => reset::execute(yes),
        Set { vault, name, value } => with_app(|app| secrets::set(app, &vault, &name, &value)),
        Get { vault, name } => with_app(|app| secrets::get(app, &vault, &name)),
        Delete { vault, name } => with_app(|app| secrets::delete(app, &vault, &name)),
        List { vault, json } => with_app(|app| secrets::list(app, &vault, json)),
        Vaults { json } => with_app(|app| secrets::vaults(app, json)),
        Search { pattern } => with_app(|app| secrets::search(app, &pattern)),
        Generate {
            vault,
            name,
            generator,
            to_env,
            force,
        } => with_app(|app| generate::execute(app, &vault, &name, &generator, to_env, force)),
        Export {
            vault,
            to,
            format,
            force,
            append,
            dry_run,
            backup,
            backup_dir,
            include,
            exclude,
        } => {
            let opts = crate::core::export::ExportOptions {
                path: to,
                format,
                force,
                append,
                dry_run,
                backup,
                backup_dir,
                include,
                exclude,
            };
            with_app(|app| export::execute(app, &vault, &opts))
        }
    }
}

/// Run `f` against an opened app, then close it.
///
/// An error from `f` wins over an error from closing.
fn with_app(f: impl FnOnce(&App) -> Result<()>) -> Result<()> {
    close_after(open_app()?, f)
}

fn close_after(app: App, f: impl FnOnce(&App) -> Result<()>) -> Result<()> {
    let result = f(&app);
    let closed = app.close();
    result.and(closed)
}

/// Open the configured store with the master key from the environment.
///
/// The key is checked before the store is touched, so a missing key
/// never creates an empty database.
fn open_app() -> Result<App> {
    let config = Config::load()?;
    let cipher = CryptoEngine::new(config.master_key()?)?;
    let store = store::open(&config)?;
    Ok(App::new(store, Box::new(cipher), Registry::with_defaults()))
}
