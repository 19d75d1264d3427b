//! Term index abstraction and the in-memory implementation.
//!
//! The walker and the search orchestrator only need two operations from an
//! index: `add(key, text)` and `search(query) -> keys`. [`TextIndex`] names
//! that seam; [`TermIndex`] is the implementation used by the builder.
//!
//! # Matching
//!
//! Text and queries are normalized the same way: lowercased and split on
//! every character that is not alphanumeric. An entry matches a query when
//! every query term matches at least one entry term. How a single term
//! matches depends on [`Tokenize`]:
//!
//! | Mode | Entry term `banner`, query term `ban` |
//! |------|---------------------------------------|
//! | `strict` | no match (terms must be equal) |
//! | `forward` | match (prefix) |
//! | `full` | match (substring) |

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

/// A keyed full-text index.
pub trait TextIndex {
    /// Index `text` under `key`, replacing any text previously stored for it.
    fn add(&mut self, key: &str, text: &str);

    /// Keys whose text matches `query`, in insertion order.
    fn search(&self, query: &str) -> Vec<String>;

    /// Number of distinct keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How a query term is compared with an indexed term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tokenize {
    /// Whole-term equality.
    #[default]
    Strict,
    /// Indexed term starts with the query term.
    Forward,
    /// Indexed term contains the query term.
    Full,
}

impl Tokenize {
    fn matches(self, term: &str, query_term: &str) -> bool {
        match self {
            Tokenize::Strict => term == query_term,
            Tokenize::Forward => term.starts_with(query_term),
            Tokenize::Full => term.contains(query_term),
        }
    }
}

impl fmt::Display for Tokenize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tokenize::Strict => "strict",
            Tokenize::Forward => "forward",
            Tokenize::Full => "full",
        };
        f.write_str(name)
    }
}

/// Options applied to every index created by the builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexOptions {
    pub tokenize: Tokenize,
}

/// Split `text` into lowercase alphanumeric terms.
pub fn normalize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

struct Entry {
    key: String,
    text: String,
    terms: Vec<String>,
}

/// In-memory term index with insertion-ordered results.
pub struct TermIndex {
    options: IndexOptions,
    entries: Vec<Entry>,
    positions: HashMap<String, usize>,
}

impl TermIndex {
    pub fn new(options: IndexOptions) -> Self {
        Self {
            options,
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// The text stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.positions
            .get(key)
            .map(|&pos| self.entries[pos].text.as_str())
    }

    /// All `(key, text)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.key.as_str(), e.text.as_str()))
    }
}

impl Default for TermIndex {
    fn default() -> Self {
        Self::new(IndexOptions::default())
    }
}

impl fmt::Debug for TermIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TermIndex")
            .field("tokenize", &self.options.tokenize)
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl TextIndex for TermIndex {
    fn add(&mut self, key: &str, text: &str) {
        let entry = Entry {
            key: key.to_string(),
            text: text.to_string(),
            terms: normalize(text),
        };
        match self.positions.get(key) {
            Some(&pos) => self.entries[pos] = entry,
            None => {
                self.positions.insert(key.to_string(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    fn search(&self, query: &str) -> Vec<String> {
        let query_terms = normalize(query);
        if query_terms.is_empty() {
            return Vec::new();
        }
        let mode = self.options.tokenize;
        self.entries
            .iter()
            .filter(|entry| {
                query_terms
                    .iter()
                    .all(|q| entry.terms.iter().any(|t| mode.matches(t, q)))
            })
            .map(|entry| entry.key.clone())
            .collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
