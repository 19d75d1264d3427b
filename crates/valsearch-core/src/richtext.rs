//! Rich-text flattening.
//!
//! Rich text arrives as a tree of block and inline nodes, each holding its
//! content in a `children` array. Only the string leaves carry searchable
//! text; marks, attributes and unrecognized nodes are skipped.

use serde_json::Value;

/// Concatenate every string leaf reachable through `children` arrays, in
/// document order, without separators.
///
/// A root that is a bare array is treated as the top-level `children`.
pub fn flatten(value: &Value) -> String {
    let mut out = String::new();
    match value {
        Value::Array(blocks) => {
            for block in blocks {
                collect(block, &mut out);
            }
        }
        other => collect(other, &mut out),
    }
    out
}

fn collect(node: &Value, out: &mut String) {
    match node {
        Value::String(text) => out.push_str(text),
        Value::Object(map) => {
            if let Some(Value::Array(children)) = map.get("children") {
                for child in children {
                    collect(child, out);
                }
            }
        }
        _ => {}
    }
}
