//! Search entry points for the CLI.
//!
//! The two-tier algorithm lives in `valsearch_core::search`; this module
//! loads modules from disk, builds the indexes and formats the results.

use anyhow::Result;
use tracing::info;

pub use valsearch_core::search::{SearchOutcome, SearchTier};

use valsearch_core::build::{build_indexes, Indexes};

use crate::config::Config;
use crate::loader;

/// Load every configured module and build its index pair.
pub async fn load_indexes(config: &Config) -> Result<Indexes> {
    let modules = loader::load_modules(&config.content).await?;
    let indexes = build_indexes(&modules, config.index.options())?;
    Ok(indexes)
}

/// Core search function returning structured results.
///
/// Shared by `valsearch search` and the library API. The indexes are always
/// built, so a broken module fails the search even when the query has no
/// terms to match.
pub async fn search_modules(config: &Config, query: &str) -> Result<SearchOutcome> {
    let indexes = load_indexes(config).await?;
    let outcome = valsearch_core::search::search_with_tier(&indexes, query);
    info!(query, tier = ?outcome.tier, hits = outcome.paths.len(), "search complete");
    Ok(outcome)
}

/// CLI entry point: calls [`search_modules`] and prints one source path per
/// line, or a JSON array with `--json`.
pub async fn run_search(config: &Config, query: &str, json: bool) -> Result<()> {
    let outcome = search_modules(config, query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.paths)?);
        return Ok(());
    }

    for path in &outcome.paths {
        println!("{}", path);
    }
    Ok(())
}
