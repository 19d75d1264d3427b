//! Source paths: addressing values inside content modules.
//!
//! A source path has the form `<module file path>?p=<pointer>`, for example
//! `/content/pages/home.val.ts?p="sections".0."title"`. The module file path
//! is a slash-separated location ending in `.val.ts` or `.val.js`; the
//! pointer is a dot-separated list of bare segments (array indices) and
//! JSON-quoted segments (object and record keys). Quoting lets keys contain
//! dots and quotes and still split back unambiguously.
//!
//! The module root is addressed with an empty pointer: `/content/home.val.ts?p=`.

use std::collections::HashSet;

use crate::case::split_on_case;
use crate::error::{IndexingError, Result};

/// Separator between the module file path and the in-module pointer.
pub const POINTER_MARKER: &str = "?p=";

/// Recognized content module file extensions.
pub const MODULE_EXTENSIONS: [&str; 2] = [".val.ts", ".val.js"];

/// Byte length of every entry in [`MODULE_EXTENSIONS`].
const MODULE_EXTENSION_LEN: usize = 7;

/// Split a source path at the first [`POINTER_MARKER`].
///
/// Returns the module file path and, if the marker is present, the pointer
/// (which is empty for the module root).
pub fn split_module_file_path_and_pointer(path: &str) -> (&str, Option<&str>) {
    match path.find(POINTER_MARKER) {
        Some(pos) => (&path[..pos], Some(&path[pos + POINTER_MARKER.len()..])),
        None => (path, None),
    }
}

/// True when `path` addresses the root value of its module.
pub fn is_module_root(path: &str) -> bool {
    path.ends_with(POINTER_MARKER)
}

/// True when `module_file_path` ends in a recognized module extension.
pub fn has_module_extension(module_file_path: &str) -> bool {
    MODULE_EXTENSIONS
        .iter()
        .any(|ext| module_file_path.ends_with(ext))
}

/// The source path of a module's root value.
pub fn root_path(module_file_path: &str) -> String {
    format!("{}{}", module_file_path, POINTER_MARKER)
}

/// The source path of element `index` of the array at `path`.
pub fn child_index_path(path: &str, index: usize) -> String {
    join_segment(path, &index.to_string())
}

/// The source path of `key` inside the object or record at `path`.
///
/// The key is always JSON-quoted so it survives [`split_module_path`].
pub fn child_key_path(path: &str, key: &str) -> String {
    let quoted = serde_json::Value::String(key.to_string()).to_string();
    join_segment(path, &quoted)
}

fn join_segment(path: &str, segment: &str) -> String {
    if is_module_root(path) {
        format!("{}{}", path, segment)
    } else {
        format!("{}.{}", path, segment)
    }
}

/// Decompose an in-module pointer into its segments.
///
/// Bare segments run to the next `.`; quoted segments are JSON string
/// literals and are returned unquoted and unescaped. Empty segments are
/// dropped.
///
/// # Errors
///
/// [`IndexingError::MalformedPointer`] when a quoted segment is never closed,
/// is not a valid JSON string, or is followed by anything other than `.` or
/// the end of the pointer.
///
/// # Example
///
/// ```rust
/// use valsearch_core::path::split_module_path;
///
/// let segments = split_module_path(r#""items".0."a.b""#).unwrap();
/// assert_eq!(segments, vec!["items", "0", "a.b"]);
/// ```
pub fn split_module_path(pointer: &str) -> Result<Vec<String>> {
    let bytes = pointer.as_bytes();
    let mut segments = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'"' {
            let start = i;
            let mut j = i + 1;
            loop {
                match bytes.get(j) {
                    None => return Err(malformed(pointer, "unterminated quoted segment")),
                    Some(b'\\') => j += 2,
                    Some(b'"') => break,
                    Some(_) => j += 1,
                }
            }
            let segment: String = serde_json::from_str(&pointer[start..=j])
                .map_err(|e| malformed(pointer, format!("invalid quoted segment: {}", e)))?;
            if !segment.is_empty() {
                segments.push(segment);
            }
            i = j + 1;
            match bytes.get(i) {
                None => {}
                Some(b'.') => i += 1,
                Some(_) => {
                    return Err(malformed(
                        pointer,
                        format!("expected '.' after quoted segment at byte {}", i),
                    ))
                }
            }
        } else {
            let end = pointer[i..]
                .find('.')
                .map(|pos| i + pos)
                .unwrap_or(pointer.len());
            let segment = &pointer[i..end];
            if !segment.is_empty() {
                segments.push(segment.to_string());
            }
            i = end + 1;
        }
    }

    Ok(segments)
}

fn malformed(pointer: &str, reason: impl Into<String>) -> IndexingError {
    IndexingError::MalformedPointer {
        pointer: pointer.to_string(),
        reason: reason.into(),
    }
}

/// Produce the searchable tokens of a source path.
///
/// Token order:
///
/// 1. the full path;
/// 2. every module path segment, each followed by its case-split words;
/// 3. the case-split words of the module base name (extension stripped),
///    then the base name itself;
/// 4. every pointer segment, each followed by its case-split words.
///
/// Tokens from steps 2 and 4 are emitted only on first sight. The full path
/// and the base name tokens are always emitted.
///
/// # Errors
///
/// [`IndexingError::UnsupportedModuleType`] when the module file path lacks a
/// recognized extension, and [`IndexingError::MalformedPointer`] when the
/// pointer cannot be split.
pub fn tokenize_source_path(path: &str) -> Result<Vec<String>> {
    let mut tokens = vec![path.to_string()];
    let mut seen: HashSet<String> = HashSet::new();
    let (module_file_path, pointer) = split_module_file_path_and_pointer(path);

    for segment in module_file_path.split('/').skip(1) {
        push_with_words(segment, &mut tokens, &mut seen);
    }

    if !has_module_extension(module_file_path) {
        return Err(IndexingError::UnsupportedModuleType {
            path: module_file_path.to_string(),
        });
    }
    let base = &module_file_path[..module_file_path.len() - MODULE_EXTENSION_LEN];
    tokens.extend(split_on_case(base));
    tokens.push(base.to_string());

    if let Some(pointer) = pointer {
        for segment in split_module_path(pointer)? {
            push_with_words(&segment, &mut tokens, &mut seen);
        }
    }

    Ok(tokens)
}

fn push_with_words(segment: &str, tokens: &mut Vec<String>, seen: &mut HashSet<String>) {
    if segment.is_empty() || !seen.insert(segment.to_string()) {
        return;
    }
    tokens.push(segment.to_string());
    for word in split_on_case(segment) {
        if seen.insert(word.clone()) {
            tokens.push(word);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_at_marker() {
        assert_eq!(
            split_module_file_path_and_pointer("/a/b.val.ts?p=\"x\".0"),
            ("/a/b.val.ts", Some("\"x\".0"))
        );
        assert_eq!(
            split_module_file_path_and_pointer("/a/b.val.ts?p="),
            ("/a/b.val.ts", Some(""))
        );
        assert_eq!(
            split_module_file_path_and_pointer("/a/b.val.ts"),
            ("/a/b.val.ts", None)
        );
    }

    #[test]
    fn test_split_uses_first_marker() {
        let (module, pointer) = split_module_file_path_and_pointer("/a.val.ts?p=\"?p=\"");
        assert_eq!(module, "/a.val.ts");
        assert_eq!(pointer, Some("\"?p=\""));
    }

    #[test]
    fn test_child_paths() {
        let root = root_path("/blog.val.ts");
        assert_eq!(root, "/blog.val.ts?p=");
        assert!(is_module_root(&root));

        let posts = child_key_path(&root, "posts");
        assert_eq!(posts, "/blog.val.ts?p=\"posts\"");
        assert!(!is_module_root(&posts));

        let first = child_index_path(&posts, 0);
        assert_eq!(first, "/blog.val.ts?p=\"posts\".0");
        assert_eq!(child_index_path(&root, 3), "/blog.val.ts?p=3");
    }

    #[test]
    fn test_child_key_path_escapes_quotes() {
        let path = child_key_path("/a.val.ts?p=", "say \"hi\"");
        assert_eq!(path, r#"/a.val.ts?p="say \"hi\"""#);
    }

    #[test]
    fn test_split_bare_segments() {
        assert_eq!(split_module_path("a.0.b").unwrap(), vec!["a", "0", "b"]);
        assert!(split_module_path("").unwrap().is_empty());
    }

    #[test]
    fn test_split_drops_empty_segments() {
        assert_eq!(split_module_path("a..b.").unwrap(), vec!["a", "b"]);
        assert_eq!(split_module_path("\"\".a").unwrap(), vec!["a"]);
    }

    #[test]
    fn test_split_quoted_with_dots_and_quotes() {
        let segments = split_module_path(r#""a.b"."say \"hi\"".2"#).unwrap();
        assert_eq!(segments, vec!["a.b", "say \"hi\"", "2"]);
    }

    #[test]
    fn test_pointer_round_trip() {
        let keys = ["plain", "with.dot", "with \"quote\"", "back\\slash", "ünïcode", "?p="];
        let pointer = keys
            .iter()
            .map(|k| serde_json::Value::String(k.to_string()).to_string())
            .collect::<Vec<_>>()
            .join(".");
        assert_eq!(split_module_path(&pointer).unwrap(), keys);
    }

    #[test]
    fn test_split_unterminated_quote() {
        let err = split_module_path("\"open.a").unwrap_err();
        assert!(matches!(err, IndexingError::MalformedPointer { .. }));

        let err = split_module_path(r#""escaped\""#).unwrap_err();
        assert!(matches!(err, IndexingError::MalformedPointer { .. }));
    }

    #[test]
    fn test_split_garbage_after_quote() {
        let err = split_module_path("\"a\"b").unwrap_err();
        assert!(matches!(err, IndexingError::MalformedPointer { .. }));
    }

    #[test]
    fn test_tokenize_bare_module_path() {
        let tokens = tokenize_source_path("/content/basic.val.ts").unwrap();
        assert_eq!(
            tokens,
            vec![
                "/content/basic.val.ts",
                "content",
                "basic.val.ts",
                "/content/basic",
                "/content/basic",
            ]
        );
    }

    #[test]
    fn test_tokenize_with_pointer() {
        let tokens =
            tokenize_source_path("/app/heroBanner.val.ts?p=\"items\".0.\"imageUrl\"").unwrap();
        assert_eq!(
            tokens,
            vec![
                "/app/heroBanner.val.ts?p=\"items\".0.\"imageUrl\"",
                "app",
                "heroBanner.val.ts",
                "hero",
                "Banner.val.ts",
                "/app/hero",
                "Banner",
                "/app/heroBanner",
                "items",
                "0",
                "imageUrl",
                "image",
                "Url",
            ]
        );
    }

    #[test]
    fn test_tokenize_dedups_segments_and_pointer() {
        let tokens = tokenize_source_path("/blog/blog.val.js?p=\"blog\".\"title\"").unwrap();
        assert_eq!(tokens.iter().filter(|t| t.as_str() == "blog").count(), 1);
        assert_eq!(tokens.last().map(String::as_str), Some("title"));
    }

    #[test]
    fn test_tokenize_root_pointer() {
        let tokens = tokenize_source_path("/content/basic.val.ts?p=").unwrap();
        assert_eq!(tokens[0], "/content/basic.val.ts?p=");
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_tokenize_first_token_is_full_path() {
        for path in [
            "/a.val.ts",
            "/a/b/cDe.val.js?p=0",
            "/x/y.val.ts?p=\"k.k\".\"z\"",
        ] {
            assert_eq!(tokenize_source_path(path).unwrap()[0], path);
        }
    }

    #[test]
    fn test_tokenize_unsupported_extension() {
        let err = tokenize_source_path("/content/basic.json").unwrap_err();
        assert_eq!(
            err,
            IndexingError::UnsupportedModuleType {
                path: "/content/basic.json".to_string()
            }
        );
    }

    #[test]
    fn test_tokenize_malformed_pointer() {
        let err = tokenize_source_path("/a.val.ts?p=\"open").unwrap_err();
        assert!(matches!(err, IndexingError::MalformedPointer { .. }));
    }
}
