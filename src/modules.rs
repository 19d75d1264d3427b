//! `valsearch modules`: list discovered modules and their index sizes.

use anyhow::Result;

use valsearch_core::build::build_module_index;
use valsearch_core::index::TextIndex;

use crate::config::Config;
use crate::loader;

pub async fn list_modules(config: &Config) -> Result<()> {
    let modules = loader::load_modules(&config.content).await?;
    let options = config.index.options();

    println!("{:<48} {:<10} {:>6} {:>8}", "MODULE", "SCHEMA", "PATHS", "CONTENT");
    for (module_path, module) in &modules {
        let index = build_module_index(module_path, module, options)?;
        println!(
            "{:<48} {:<10} {:>6} {:>8}",
            module_path,
            module.schema.kind(),
            index.path_index.len(),
            index.content_index.len()
        );
    }

    Ok(())
}
