//! Schema model for content modules.
//!
//! A schema is the serialized description of the shape of a module's value,
//! tagged by its `type` field:
//!
//! ```json
//! { "type": "object", "opt": false, "items": {
//!     "title": { "type": "string", "opt": false },
//!     "tags":  { "type": "array", "item": { "type": "keyOf", "opt": false } }
//! } }
//! ```
//!
//! Fields the walker has no use for (`opt`, validation options, raw
//! metadata) are ignored. Unknown `type` values deserialize to
//! [`SchemaNode::Other`] and are never indexed.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Description of the shape expected at one position of a content value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum SchemaNode {
    #[serde(rename = "richtext")]
    RichText,
    #[serde(rename = "array")]
    Array {
        #[serde(default)]
        item: Option<Box<SchemaNode>>,
    },
    #[serde(rename = "object")]
    Object {
        #[serde(default)]
        items: BTreeMap<String, SchemaNode>,
    },
    /// Open-ended keyed map; every value shares `item`.
    #[serde(rename = "record")]
    Record {
        #[serde(default)]
        item: Option<Box<SchemaNode>>,
    },
    /// Tagged union of object variants, or a union of literals.
    #[serde(rename = "union")]
    Union {
        key: UnionKey,
        #[serde(default)]
        items: Vec<SchemaNode>,
    },
    #[serde(rename = "literal")]
    Literal { value: Value },
    #[serde(rename = "string")]
    String,
    /// A string naming a key of another module's record.
    #[serde(rename = "keyOf")]
    KeyOf,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(other)]
    Other,
}

/// Discriminant of a [`SchemaNode::Union`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UnionKey {
    /// Name of the field whose literal value selects the variant.
    Field(String),
    /// First literal of a union of literals; the remaining literals are the
    /// union's `items`.
    Schema(Box<SchemaNode>),
}

impl SchemaNode {
    /// The `type` tag this node was declared with.
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaNode::RichText => "richtext",
            SchemaNode::Array { .. } => "array",
            SchemaNode::Object { .. } => "object",
            SchemaNode::Record { .. } => "record",
            SchemaNode::Union { .. } => "union",
            SchemaNode::Literal { .. } => "literal",
            SchemaNode::String => "string",
            SchemaNode::KeyOf => "keyOf",
            SchemaNode::Date => "date",
            SchemaNode::Number => "number",
            SchemaNode::Boolean => "boolean",
            SchemaNode::Other => "other",
        }
    }
}

/// One content module: its root value and the schema describing it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentModule {
    #[serde(default)]
    pub value: Value,
    pub schema: SchemaNode,
}

/// Content modules keyed by module file path (e.g. `/content/home.val.ts`).
pub type ModuleSet = BTreeMap<String, ContentModule>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: Value) -> SchemaNode {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_scalars_ignore_extra_fields() {
        assert_eq!(parse(json!({"type": "string", "opt": true})), SchemaNode::String);
        assert_eq!(parse(json!({"type": "keyOf", "path": "/a.val.ts"})), SchemaNode::KeyOf);
        assert_eq!(parse(json!({"type": "richtext", "options": {}})), SchemaNode::RichText);
        assert_eq!(parse(json!({"type": "boolean"})), SchemaNode::Boolean);
    }

    #[test]
    fn test_unknown_type_is_other() {
        let schema = parse(json!({"type": "image", "opt": false, "options": {"accept": "image/*"}}));
        assert_eq!(schema, SchemaNode::Other);
        assert_eq!(schema.kind(), "other");
    }

    #[test]
    fn test_nested_object() {
        let schema = parse(json!({
            "type": "object",
            "items": {
                "title": {"type": "string"},
                "tags": {"type": "array", "item": {"type": "keyOf"}}
            }
        }));
        let SchemaNode::Object { items } = schema else {
            panic!("expected object");
        };
        assert_eq!(items["title"], SchemaNode::String);
        assert_eq!(
            items["tags"],
            SchemaNode::Array {
                item: Some(Box::new(SchemaNode::KeyOf))
            }
        );
    }

    #[test]
    fn test_missing_item_is_none() {
        assert_eq!(parse(json!({"type": "array"})), SchemaNode::Array { item: None });
        assert_eq!(parse(json!({"type": "record"})), SchemaNode::Record { item: None });
    }

    #[test]
    fn test_union_with_field_key() {
        let schema = parse(json!({
            "type": "union",
            "key": "type",
            "items": [
                {"type": "object", "items": {"type": {"type": "literal", "value": "a"}}}
            ]
        }));
        let SchemaNode::Union { key, items } = schema else {
            panic!("expected union");
        };
        assert_eq!(key, UnionKey::Field("type".to_string()));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_union_of_literals() {
        let schema = parse(json!({
            "type": "union",
            "key": {"type": "literal", "value": "small"},
            "items": [{"type": "literal", "value": "large"}]
        }));
        let SchemaNode::Union { key, .. } = schema else {
            panic!("expected union");
        };
        assert_eq!(
            key,
            UnionKey::Schema(Box::new(SchemaNode::Literal {
                value: json!("small")
            }))
        );
    }

    #[test]
    fn test_content_module() {
        let module: ContentModule = serde_json::from_value(json!({
            "value": true,
            "schema": {"type": "boolean"}
        }))
        .unwrap();
        assert_eq!(module.value, json!(true));
        assert_eq!(module.schema.kind(), "boolean");
    }
}
