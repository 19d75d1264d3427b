//! # valsearch core
//!
//! Pure, synchronous indexing and search logic for schema-described content
//! modules. A module is a JSON value plus the schema that describes it; the
//! core walks both in lockstep and builds two term indexes per module:
//!
//! - a **path index** over the tokens of every structural address
//!   (`/content/page.val.ts?p="hero".title`), and
//! - a **content index** over the literal text found at each address.
//!
//! [`search::search`] queries the path indexes first and only falls back to
//! the content indexes when no address matched.
//!
//! This crate performs no filesystem I/O and has no async runtime; module
//! discovery and the CLI live in the `valsearch` app crate.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`case`] | Split identifiers at uppercase boundaries |
//! | [`path`] | Source path helpers, pointer decomposition, path tokenizer |
//! | [`richtext`] | Flatten rich-text trees to plain text |
//! | [`schema`] | Schema model and content modules |
//! | [`index`] | Term index abstraction and in-memory implementation |
//! | [`walk`] | Schema-driven tree walker |
//! | [`build`] | Per-module index construction |
//! | [`search`] | Two-tier search orchestration |
//! | [`error`] | Indexing errors |

pub mod build;
pub mod case;
pub mod error;
pub mod index;
pub mod path;
pub mod richtext;
pub mod schema;
pub mod search;
pub mod walk;

pub use error::{IndexingError, Result};
