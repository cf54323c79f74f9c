//! Veil - a local secrets manager.
//!
//! Secrets are encrypted with AES-256-GCM under a single master key,
//! stored in SQLite grouped by vault, and exported into `.env` files.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── secrets       # set/get/delete/list/vaults/search
//! │   ├── export        # Vault export with dry-run preview
//! │   ├── generate      # Generate-and-store
//! │   ├── quick         # Ad-hoc generation
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── app/          # Facade over store, cipher and exporters
//!     ├── cipher/       # AES-256-GCM engine
//!     ├── config        # TOML file + environment
//!     ├── export/       # .env reconciliation and atomic writes
//!     ├── generator/    # Passwords, API keys, JWT secrets
//!     ├── quick         # Batch and templated generation
//!     └── store/        # Store trait and SQLite backend
//! ```
//!
//! # Example
//!
//! ```no_run
//! use veil::core::app::App;
//! use veil::core::cipher::CryptoEngine;
//! use veil::core::export::Registry;
//! use veil::core::store::SqliteStore;
//!
//! # fn main() -> veil::error::Result<()> {
//! let key = veil::core::cipher::generate_key();
//! let app = App::new(
//!     Box::new(SqliteStore::open(std::path::Path::new("/tmp/veil.db"))?),
//!     Box::new(CryptoEngine::new(&key)?),
//!     Registry::with_defaults(),
//! );
//! app.set("prod", "DATABASE_URL", "postgres://localhost/app")?;
//! assert_eq!(app.get("prod", "DATABASE_URL")?.as_str(), "postgres://localhost/app");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
