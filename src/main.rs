//! # Docsift CLI (`dsift`)
//!
//! The `dsift` binary drives the deduplication and classification engine
//! over a local inbox directory and a JSON document store.
//!
//! ## Usage
//!
//! ```bash
//! dsift --config ./config/dsift.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `dsift init` | Create an empty store file |
//! | `dsift ingest` | Screen, classify, and store every inbox file |
//! | `dsift check <file>` | Duplicate check and classification, nothing stored |
//! | `dsift classify <file>` | Print the classifier's analysis |
//! | `dsift review <id> <status>` | Set a document's review status |
//! | `dsift metrics` | Corpus quality metrics and issues |
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`
//! (e.g. `RUST_LOG=docsift=info,docsift_core=debug`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use docsift::{check, config, ingest, json_store::JsonStore, report, review};

/// Docsift CLI: screen incoming documents for duplicates, classify them,
/// and track corpus readiness.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/dsift.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "dsift",
    about = "Docsift — near-duplicate detection and classification for document corpora",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/dsift.toml`.
    #[arg(long, global = true, default_value = "./config/dsift.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Create the store file.
    ///
    /// Writes an empty `{ "documents": [] }` snapshot at `[store].path`.
    /// Running it again leaves an existing store untouched.
    Init,

    /// Ingest every file from the filesystem connector.
    ///
    /// Each file is checked against the accepted corpus (and against files
    /// accepted earlier in the same run). Unique files are classified and
    /// stored as `pending` with their detected labels.
    Ingest {
        /// Report what would be accepted without writing to the store.
        #[arg(long)]
        dry_run: bool,

        /// Maximum number of files to process.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Check one file against the store without storing it.
    ///
    /// Prints the duplicate result and the classifier's analysis as JSON.
    Check {
        /// Path to a UTF-8 text file.
        file: PathBuf,
    },

    /// Classify one file and print the analysis as JSON.
    Classify {
        /// Path to a UTF-8 text file.
        file: PathBuf,
    },

    /// Record a review decision for a stored document.
    Review {
        /// Document ID (UUID).
        id: String,

        /// New status: `pending`, `ready`, `approved`, or `rejected`.
        status: String,
    },

    /// Show corpus quality metrics and the issues they raise.
    Metrics {
        /// Print the full report as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            if JsonStore::init(&cfg.store.path)? {
                println!("Store initialized at {}", cfg.store.path.display());
            } else {
                println!("Store already exists at {}", cfg.store.path.display());
            }
        }
        Commands::Ingest { dry_run, limit } => {
            ingest::run_ingest(&cfg, dry_run, limit).await?;
        }
        Commands::Check { file } => {
            check::run_check(&cfg, &file).await?;
        }
        Commands::Classify { file } => {
            check::run_classify(&cfg, &file)?;
        }
        Commands::Review { id, status } => {
            review::run_review(&cfg, &id, &status).await?;
        }
        Commands::Metrics { json } => {
            report::run_metrics(&cfg, json).await?;
        }
    }

    Ok(())
}
