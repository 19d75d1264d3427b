//! # valsearch
//!
//! Structural path and full-text search over schema-described content
//! modules.
//!
//! A content module is a JSON value paired with the schema describing it,
//! addressed by a module file path such as `/content/pages/home.val.ts`.
//! valsearch loads modules from a directory, walks each value against its
//! schema and builds two indexes per module: one over the tokens of every
//! structural address, one over the text found at each address. Queries hit
//! the structural indexes first and fall back to the text indexes only when
//! no address matched.
//!
//! ## Quick Start
//!
//! ```bash
//! valsearch --content ./content search "heroBanner"
//! valsearch --content ./content search "Welcome" --json
//! valsearch --content ./content modules
//! valsearch tokens '/app/heroBanner.val.ts?p="items".0'
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`loader`] | Discover and parse module files on disk |
//! | [`search`] | Build indexes and run the two-tier search |
//! | [`modules`] | List modules with index sizes |
//! | [`tokens`] | Print the tokenization of a source path |
//!
//! The indexing algorithms live in the `valsearch-core` crate.

pub mod config;
pub mod loader;
pub mod modules;
pub mod search;
pub mod tokens;
