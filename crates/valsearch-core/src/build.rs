//! Per-module index construction.
//!
//! Each module gets its own [`ModuleIndex`]: a path index seeded with the
//! bare module file path, then filled by the [walker](crate::walk) together
//! with the content index. Modules never share index state.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::Result;
use crate::index::{IndexOptions, TermIndex, TextIndex};
use crate::path::{root_path, tokenize_source_path};
use crate::schema::{ContentModule, ModuleSet};
use crate::walk::visit;

/// The pair of indexes built for one module.
#[derive(Debug)]
pub struct ModuleIndex {
    /// Source path -> tokens of that path.
    pub path_index: TermIndex,
    /// Source path -> text found at that path.
    pub content_index: TermIndex,
}

/// Module indexes keyed by module file path.
pub type Indexes = BTreeMap<String, ModuleIndex>;

/// Build the index pair for a single module.
pub fn build_module_index(
    module_file_path: &str,
    module: &ContentModule,
    options: IndexOptions,
) -> Result<ModuleIndex> {
    let mut path_index = TermIndex::new(options);
    let mut content_index = TermIndex::new(options);

    let tokens = tokenize_source_path(module_file_path)?;
    path_index.add(module_file_path, &tokens.join(" "));

    visit(
        &module.value,
        &module.schema,
        &root_path(module_file_path),
        &mut path_index,
        &mut content_index,
    )?;

    debug!(
        module = module_file_path,
        paths = path_index.len(),
        contents = content_index.len(),
        "indexed module"
    );

    Ok(ModuleIndex {
        path_index,
        content_index,
    })
}

/// Build index pairs for every module.
///
/// Fails on the first module that cannot be indexed.
pub fn build_indexes(modules: &ModuleSet, options: IndexOptions) -> Result<Indexes> {
    let mut indexes = Indexes::new();
    for (module_file_path, module) in modules {
        let index = build_module_index(module_file_path, module, options)?;
        indexes.insert(module_file_path.clone(), index);
    }
    debug!(modules = indexes.len(), tokenize = %options.tokenize, "built indexes");
    Ok(indexes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndexingError;
    use serde_json::json;

    fn module(value: serde_json::Value, schema: serde_json::Value) -> ContentModule {
        serde_json::from_value(json!({"value": value, "schema": schema})).unwrap()
    }

    #[test]
    fn test_boolean_module() {
        let index = build_module_index(
            "/content/basic.val.ts",
            &module(json!(true), json!({"type": "boolean"})),
            IndexOptions::default(),
        )
        .unwrap();
        assert_eq!(index.path_index.len(), 1);
        assert!(index.path_index.get("/content/basic.val.ts").is_some());
        assert!(index.content_index.is_empty());
        assert_eq!(
            index.path_index.search("basic"),
            vec!["/content/basic.val.ts"]
        );
    }

    #[test]
    fn test_modules_are_independent() {
        let mut modules = ModuleSet::new();
        modules.insert(
            "/a.val.ts".to_string(),
            module(json!("alpha"), json!({"type": "string"})),
        );
        modules.insert(
            "/b.val.ts".to_string(),
            module(json!(["beta"]), json!({"type": "array", "item": {"type": "string"}})),
        );
        let indexes = build_indexes(&modules, IndexOptions::default()).unwrap();
        assert_eq!(indexes.len(), 2);
        assert_eq!(indexes["/a.val.ts"].path_index.len(), 1);
        assert_eq!(indexes["/a.val.ts"].content_index.get("/a.val.ts?p="), Some("alpha"));
        assert_eq!(indexes["/b.val.ts"].path_index.len(), 2);
        assert_eq!(indexes["/b.val.ts"].content_index.get("/b.val.ts?p=0"), Some("beta"));
    }

    #[test]
    fn test_bad_module_path_aborts_build() {
        let mut modules = ModuleSet::new();
        modules.insert(
            "/ok.val.ts".to_string(),
            module(json!("x"), json!({"type": "string"})),
        );
        modules.insert(
            "/broken.ts".to_string(),
            module(json!("y"), json!({"type": "string"})),
        );
        let err = build_indexes(&modules, IndexOptions::default()).unwrap_err();
        assert_eq!(
            err,
            IndexingError::UnsupportedModuleType {
                path: "/broken.ts".to_string()
            }
        );
    }
}
