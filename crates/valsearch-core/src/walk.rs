//! Schema-driven tree walker.
//!
//! [`visit`] descends a content value and its schema in lockstep. Every
//! address it passes through (except the module root) is registered in the
//! path index under its tokens; every textual leaf is registered in the
//! content index under its address.
//!
//! | Schema | Value required | Indexed content |
//! |--------|----------------|-----------------|
//! | `richtext` | any | flattened text |
//! | `array` | array | recurse per element (`.0`, `.1`, …) |
//! | `object` / `record` | object | recurse per key (`."key"`) |
//! | `union` | object with discriminant, or string | recurse into the matching variant at the same path |
//! | `string` | string | the string |
//! | `keyOf` / `date` | any | the value, when it is a string |
//! | `number` | any | the number, when it is a number |
//! | anything else | any | nothing |
//!
//! `null` is accepted for every schema and indexes nothing below its address.

use serde_json::Value;

use crate::error::{value_kind, IndexingError, Result};
use crate::index::TextIndex;
use crate::path::{child_index_path, child_key_path, is_module_root, tokenize_source_path};
use crate::richtext;
use crate::schema::{SchemaNode, UnionKey};

/// Walk `value` against `schema`, registering `path` and everything below it.
///
/// Call once per module with the module's root path (see
/// [`root_path`](crate::path::root_path)).
///
/// # Errors
///
/// Fails on the first incongruence between value and schema; nothing about
/// the remainder of the module is indexed afterwards.
pub fn visit<I: TextIndex>(
    value: &Value,
    schema: &SchemaNode,
    path: &str,
    path_index: &mut I,
    content_index: &mut I,
) -> Result<()> {
    if !is_module_root(path) {
        register_path(path, path_index)?;
    }

    if value.is_null() {
        return Ok(());
    }

    match schema {
        SchemaNode::RichText => {
            register_path(path, path_index)?;
            content_index.add(path, &richtext::flatten(value));
        }
        SchemaNode::Array { item } => {
            let elements = value
                .as_array()
                .ok_or_else(|| IndexingError::type_mismatch(path, "array", value))?;
            let item = item.as_deref().ok_or_else(|| missing(path))?;
            for (i, element) in elements.iter().enumerate() {
                let child = child_index_path(path, i);
                visit(element, item, &child, path_index, content_index)?;
            }
        }
        SchemaNode::Object { .. } | SchemaNode::Record { .. } => {
            let map = value
                .as_object()
                .ok_or_else(|| IndexingError::type_mismatch(path, "object", value))?;
            for (key, child_value) in map {
                let child = child_key_path(path, key);
                let child_schema = match schema {
                    SchemaNode::Object { items } => items.get(key),
                    SchemaNode::Record { item } => item.as_deref(),
                    _ => None,
                }
                .ok_or_else(|| missing(&child))?;
                visit(child_value, child_schema, &child, path_index, content_index)?;
            }
        }
        SchemaNode::Union { key, items } => match key {
            UnionKey::Field(field) => {
                let variant = resolve_union(value, field, items, path)?;
                visit(value, variant, path, path_index, content_index)?;
            }
            UnionKey::Schema(_) => {
                let text = value
                    .as_str()
                    .ok_or_else(|| IndexingError::type_mismatch(path, "string", value))?;
                content_index.add(path, text);
            }
        },
        SchemaNode::String => {
            let text = value
                .as_str()
                .ok_or_else(|| IndexingError::type_mismatch(path, "string", value))?;
            content_index.add(path, text);
        }
        SchemaNode::KeyOf | SchemaNode::Date => {
            if let Some(text) = value.as_str() {
                content_index.add(path, text);
            }
        }
        SchemaNode::Number => {
            if let Value::Number(n) = value {
                content_index.add(path, &number_text(n));
            }
        }
        SchemaNode::Boolean | SchemaNode::Literal { .. } | SchemaNode::Other => {}
    }

    Ok(())
}

fn register_path<I: TextIndex>(path: &str, path_index: &mut I) -> Result<()> {
    let tokens = tokenize_source_path(path)?;
    path_index.add(path, &tokens.join(" "));
    Ok(())
}

fn missing(path: &str) -> IndexingError {
    IndexingError::SchemaMissing {
        path: path.to_string(),
    }
}

/// Render a number the way it reads in the module source: integral floats
/// drop their fraction, and very large or very small magnitudes use an
/// exponent with an explicit sign.
fn number_text(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    let Some(f) = n.as_f64() else {
        return n.to_string();
    };
    if f == 0.0 {
        return "0".to_string();
    }
    let magnitude = f.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let text = format!("{:e}", f);
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => text,
        };
    }
    format!("{}", f)
}

/// Pick the object variant whose literal at `field` equals the value's.
fn resolve_union<'a>(
    value: &Value,
    field: &str,
    variants: &'a [SchemaNode],
    path: &str,
) -> Result<&'a SchemaNode> {
    let discriminant = value.get(field).ok_or_else(|| {
        IndexingError::union(
            path,
            format!(
                "{} value has no discriminant field '{}'",
                value_kind(value),
                field
            ),
        )
    })?;

    for variant in variants {
        let SchemaNode::Object { items } = variant else {
            return Err(IndexingError::union(
                path,
                format!("variant is a {} schema, not an object", variant.kind()),
            ));
        };
        match items.get(field) {
            Some(SchemaNode::Literal { value: literal }) => {
                if literal == discriminant {
                    return Ok(variant);
                }
            }
            Some(other) => {
                return Err(IndexingError::union(
                    path,
                    format!(
                        "discriminant '{}' is a {} schema, not a literal",
                        field,
                        other.kind()
                    ),
                ))
            }
            None => {
                return Err(IndexingError::union(
                    path,
                    format!("variant has no discriminant field '{}'", field),
                ))
            }
        }
    }

    Err(IndexingError::union(
        path,
        format!("no variant matches {} = {}", field, discriminant),
    ))
}
