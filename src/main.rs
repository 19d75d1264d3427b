//! # valsearch CLI
//!
//! The `valsearch` binary loads content modules from a directory, indexes
//! them, and answers queries with the source paths that match.
//!
//! ## Usage
//!
//! ```bash
//! valsearch --config ./config/valsearch.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `valsearch search "<query>"` | Print matching source paths, one per line |
//! | `valsearch modules` | List modules with their index sizes |
//! | `valsearch tokens <path>` | Print the tokens of a source path |
//!
//! Results go to stdout; logs go to stderr and are controlled by `RUST_LOG`
//! or `-v`. A failing command prints its error once, as `Error: ...`, and
//! exits non-zero.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use valsearch::{config, modules, search, tokens};

/// valsearch: structural path and full-text search over content modules.
#[derive(Parser)]
#[command(
    name = "valsearch",
    about = "valsearch: structural path and full-text search over content modules",
    version,
    long_about = "valsearch walks schema-described content modules, indexes every structural \
    address and every piece of text, and answers queries with the matching source paths. \
    Address matches take precedence; text is searched only when no address matches."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/valsearch.toml`. When the file does not exist,
    /// built-in defaults are used.
    #[arg(long, global = true, default_value = "./config/valsearch.toml")]
    config: PathBuf,

    /// Content root directory, overriding `[content].root`.
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Search module paths, falling back to module text.
    ///
    /// Prints the matching source paths in module order. Text content is only
    /// searched when no structural path matches the query.
    Search {
        /// The search query string.
        query: String,

        /// Print results as a JSON array.
        #[arg(long)]
        json: bool,
    },

    /// List discovered modules and their index sizes.
    Modules,

    /// Print the tokens a source path is indexed under.
    Tokens {
        /// Source path, e.g. `/content/page.val.ts?p="title"`.
        path: String,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Tokenizing needs no content
    if let Commands::Tokens { path } = &cli.command {
        tokens::run_tokens(path)?;
        return Ok(());
    }

    let mut cfg = config::load_or_minimal(&cli.config)?;
    if let Some(root) = cli.content {
        cfg.content.root = root;
    }

    match cli.command {
        Commands::Search { query, json } => search::run_search(&cfg, &query, json).await?,
        Commands::Modules => modules::list_modules(&cfg).await?,
        Commands::Tokens { .. } => unreachable!(),
    }

    Ok(())
}
