//! Flat reference table over every `$id`-bearing node in a document.
//!
//! Built once at the start of each top-level call and dropped at its end, so
//! `$ref` resolution never re-walks the tree. Any nested object qualifies, not
//! just the entries under `definitions`.
use std::collections::HashSet;

use serde_json::Value;

use crate::ir::Schema;
use crate::lower::lower_to_schema;

pub const REFERENCE_ID: &str = "$id";

#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub id: String,
    pub schema: Schema,
}

#[derive(Debug, Clone, Default)]
pub struct DefinitionTable {
    entries: Vec<Definition>, // document order
}

impl DefinitionTable {
    pub fn empty() -> Self { Self::default() }

    /// First match in document order wins; later duplicates are shadowed.
    pub fn resolve(&self, id: &str) -> Option<&Schema> {
        self.entries.iter().find(|d| d.id == id).map(|d| &d.schema)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|d| d.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

/// Walk `document` depth-first (pre-order) and collect every node with a string `$id`.
pub fn index(document: Option<&Value>) -> DefinitionTable {
    let mut entries = Vec::new();
    if let Some(document) = document {
        collect(document, &mut entries);
    }

    let mut seen = HashSet::new();
    for def in &entries {
        if !seen.insert(def.id.as_str()) {
            tracing::debug!(id = %def.id, "duplicate $id shadowed by an earlier definition");
        }
    }

    DefinitionTable { entries }
}

fn collect(v: &Value, out: &mut Vec<Definition>) {
    match v {
        Value::Object(node) => {
            // non-string ids can never equal a `$ref`, so they are not indexed
            if let Some(Value::String(id)) = node.get(REFERENCE_ID) {
                out.push(Definition { id: id.clone(), schema: lower_to_schema(v) });
            }
            for child in node.values() {
                collect(child, out);
            }
        }
        Value::Array(xs) => {
            for x in xs {
                collect(x, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Ty;
    use serde_json::json;

    #[test]
    fn no_input_yields_empty_table() {
        let table = index(None);
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.resolve("#anything").is_none());
    }

    #[test]
    fn collects_nested_ids_in_document_order() {
        let doc = json!({
            "definitions": {
                "a": { "$id": "#a", "type": "null" },
                "b": { "$id": "#b", "type": "boolean" }
            },
            "type": "object",
            "properties": {
                "deep": {
                    "type": "array",
                    "items": { "$id": "#c", "type": "integer" }
                },
                "inList": { "anyOf": [{ "$id": "#d", "type": "null" }] }
            }
        });
        let table = index(Some(&doc));
        let ids: Vec<&str> = table.ids().collect();
        assert_eq!(ids, ["#a", "#b", "#c", "#d"]);
        assert_eq!(table.resolve("#b"), Some(&Schema::Typed(Ty::Boolean)));
    }

    #[test]
    fn enclosing_node_is_recorded_before_children() {
        let doc = json!({
            "$id": "#outer",
            "type": "object",
            "properties": { "inner": { "$id": "#inner", "type": "null" } }
        });
        let ids: Vec<String> = index(Some(&doc)).ids().map(str::to_owned).collect();
        assert_eq!(ids, ["#outer", "#inner"]);
    }

    #[test]
    fn duplicates_resolve_to_first_match() {
        let doc = json!([
            { "$id": "#dup", "type": "null" },
            { "$id": "#dup", "type": "boolean" }
        ]);
        let table = index(Some(&doc));
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("#dup"), Some(&Schema::Typed(Ty::Null)));
    }

    #[test]
    fn scalars_and_non_string_ids_are_skipped() {
        assert!(index(Some(&json!(42))).is_empty());
        assert!(index(Some(&json!(null))).is_empty());
        assert!(index(Some(&json!({ "$id": 5, "type": "null" }))).is_empty());
    }
}
