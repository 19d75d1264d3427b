//! `valsearch tokens`: show how a source path is tokenized for the path index.

use anyhow::Result;

use valsearch_core::path::tokenize_source_path;

pub fn run_tokens(source_path: &str) -> Result<()> {
    for token in tokenize_source_path(source_path)? {
        println!("{}", token);
    }
    Ok(())
}
