//! Two-tier search over module indexes.
//!
//! Structural matches win outright: the path indexes of every module are
//! queried first, and the content indexes are only consulted when no path
//! matched. The two tiers are never merged.

use serde::Serialize;
use tracing::debug;

use crate::build::Indexes;
use crate::index::TextIndex;

/// Which index tier produced a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchTier {
    Path,
    Content,
    /// Neither tier matched.
    None,
}

/// Matched source paths and the tier that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub tier: SearchTier,
    pub paths: Vec<String>,
}

/// Search `indexes` for `query`, returning matched source paths in module
/// order.
pub fn search(indexes: &Indexes, query: &str) -> Vec<String> {
    search_with_tier(indexes, query).paths
}

/// Like [`search`], also reporting which tier answered.
pub fn search_with_tier(indexes: &Indexes, query: &str) -> SearchOutcome {
    let paths: Vec<String> = indexes
        .values()
        .flat_map(|module| module.path_index.search(query))
        .collect();
    if !paths.is_empty() {
        debug!(query, hits = paths.len(), "path index hit");
        return SearchOutcome {
            tier: SearchTier::Path,
            paths,
        };
    }

    let paths: Vec<String> = indexes
        .values()
        .flat_map(|module| module.content_index.search(query))
        .collect();
    debug!(query, hits = paths.len(), "content index fallback");
    let tier = if paths.is_empty() {
        SearchTier::None
    } else {
        SearchTier::Content
    };
    SearchOutcome { tier, paths }
}
