//! Indexing errors.
//!
//! Every error is fatal to the build or tokenization call that raised it.
//! Content and schema are expected to be congruent; a mismatch is a defect in
//! the input, not a condition to degrade from.

use thiserror::Error;

/// Result alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, IndexingError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexingError {
    /// No schema could be resolved for a visited position.
    #[error("schema missing at {path}")]
    SchemaMissing { path: String },

    /// The value at `path` does not have the shape its schema requires.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A tagged union could not be resolved to one of its variants.
    #[error("cannot resolve union at {path}: {reason}")]
    UnionResolution { path: String, reason: String },

    /// The module file path does not end in `.val.ts` or `.val.js`.
    #[error("unsupported module type: {path}")]
    UnsupportedModuleType { path: String },

    /// The in-module pointer could not be split into segments.
    #[error("malformed pointer '{pointer}': {reason}")]
    MalformedPointer { pointer: String, reason: String },
}

impl IndexingError {
    pub(crate) fn type_mismatch(
        path: &str,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        Self::TypeMismatch {
            path: path.to_string(),
            expected,
            found: value_kind(found),
        }
    }

    pub(crate) fn union(path: &str, reason: impl Into<String>) -> Self {
        Self::UnionResolution {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// Short name of a JSON value's type, for diagnostics.
pub fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
