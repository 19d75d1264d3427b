//! Filesystem module loader.
//!
//! Walks `content.root` and reads every file matching the include globs as
//! one content module:
//!
//! ```json
//! { "value": { "title": "Hello" },
//!   "schema": { "type": "object", "items": { "title": { "type": "string" } } } }
//! ```
//!
//! The module file path is taken from an optional top-level `"path"` field,
//! otherwise derived from the file's location under the root:
//! `pages/home.val.json` becomes `/pages/home.val.ts`, and
//! `pages/home.val.js.json` becomes `/pages/home.val.js`.

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, info};
use walkdir::WalkDir;

use valsearch_core::path::has_module_extension;
use valsearch_core::schema::{ContentModule, ModuleSet, SchemaNode};

use crate::config::ContentConfig;

#[derive(Deserialize)]
struct ModuleFile {
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    value: serde_json::Value,
    schema: SchemaNode,
}

/// Discover and parse every module under `config.root`.
///
/// Modules are keyed (and therefore ordered) by module file path. Any
/// unreadable or malformed file aborts the load.
pub async fn load_modules(config: &ContentConfig) -> Result<ModuleSet> {
    let files = scan_module_files(config)?;
    let mut modules = ModuleSet::new();

    for (file, relative) in files {
        let body = tokio::fs::read_to_string(&file)
            .await
            .with_context(|| format!("Failed to read module file: {}", file.display()))?;
        let (module_path, module) = parse_module(&body, &relative)
            .with_context(|| format!("Invalid module file: {}", file.display()))?;

        debug!(
            module = %module_path,
            file = %file.display(),
            schema = module.schema.kind(),
            "loaded module"
        );
        if modules.insert(module_path.clone(), module).is_some() {
            bail!("Duplicate module path {} (from {})", module_path, file.display());
        }
    }

    info!(modules = modules.len(), root = %config.root.display(), "loaded content modules");
    Ok(modules)
}

/// Matching files under the root, with their root-relative paths, sorted.
pub fn scan_module_files(config: &ContentConfig) -> Result<Vec<(PathBuf, String)>> {
    let root = &config.root;
    if !root.exists() {
        bail!("Content root does not exist: {}", root.display());
    }

    let include_set = build_globset(&config.include_globs)?;

    let mut default_excludes = vec![
        "**/.git/**".to_string(),
        "**/target/**".to_string(),
        "**/node_modules/**".to_string(),
    ];
    default_excludes.extend(config.exclude_globs.clone());
    let exclude_set = build_globset(&default_excludes)?;

    let mut files = Vec::new();

    let walker = WalkDir::new(root).follow_links(config.follow_symlinks);
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().replace('\\', "/");

        if exclude_set.is_match(&rel_str) {
            continue;
        }
        if !include_set.is_match(&rel_str) {
            continue;
        }

        files.push((path.to_path_buf(), rel_str));
    }

    files.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(files)
}

/// Parse one module file, resolving its module file path.
pub fn parse_module(body: &str, relative_path: &str) -> Result<(String, ContentModule)> {
    let file: ModuleFile = serde_json::from_str(body)?;

    let module_path = match file.path {
        Some(path) => path,
        None => derive_module_path(relative_path)?,
    };
    if !has_module_extension(&module_path) {
        bail!(
            "Module path '{}' must end in .val.ts or .val.js",
            module_path
        );
    }

    Ok((
        module_path,
        ContentModule {
            value: file.value,
            schema: file.schema,
        },
    ))
}

/// Map a root-relative file path to a module file path.
pub fn derive_module_path(relative_path: &str) -> Result<String> {
    let stem = relative_path
        .strip_suffix(".json")
        .unwrap_or(relative_path)
        .trim_start_matches('/');

    let module_path = if has_module_extension(stem) {
        format!("/{}", stem)
    } else if stem.ends_with(".val") {
        format!("/{}.ts", stem)
    } else {
        bail!(
            "Cannot derive a module path from '{}'; name the file *.val.json or set \"path\"",
            relative_path
        );
    };
    Ok(module_path)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
