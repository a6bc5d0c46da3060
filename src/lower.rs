use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::ir::{is_reserved_key, Properties, Schema, Ty};

// Discriminants count as present only when "truthy": null, false, 0 and "" are absent.
fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn present<'a>(node: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    node.get(key).filter(|v| is_truthy(v))
}

fn text(node: &Map<String, Value>, key: &str) -> Option<String> {
    present(node, key).and_then(Value::as_str).map(str::to_owned)
}

// An explicit `null` bound counts as 0; only a missing key takes the default.
fn bound(node: &Map<String, Value>, key: &str) -> Option<f64> {
    match node.get(key)? {
        Value::Null => Some(0.0),
        v => v.as_f64(),
    }
}

pub fn lower_to_schema(v: &Value) -> Schema {
    let Value::Object(node) = v else {
        return Schema::Unrecognized;
    };

    if tracing::enabled!(tracing::Level::TRACE) {
        for key in node.keys().filter(|k| !is_reserved_key(k)) {
            tracing::trace!(%key, "ignoring non-structural key");
        }
    }

    // precedence mirrors the reserved-key priority: type > enum > anyOf > $ref
    if let Some(ty) = present(node, "type") {
        return Schema::Typed(lower_type(ty, node));
    }
    if let Some(candidates) = present(node, "enum") {
        return Schema::Enum(candidates.as_array().cloned().unwrap_or_default());
    }
    if let Some(branches) = present(node, "anyOf") {
        let branches = branches
            .as_array()
            .map(|xs| xs.iter().map(lower_to_schema).collect())
            .unwrap_or_default();
        return Schema::AnyOf(branches);
    }
    if let Some(reference) = present(node, "$ref") {
        return match reference.as_str() {
            Some(id) => Schema::Ref(id.to_owned()),
            None => Schema::Unrecognized,
        };
    }
    Schema::Unrecognized
}

fn lower_type(ty: &Value, node: &Map<String, Value>) -> Ty {
    let Some(name) = ty.as_str() else {
        return Ty::Unknown(ty.to_string());
    };
    match name {
        "object" => Ty::Object { properties: lower_properties(present(node, "properties")) },
        "null" => Ty::Null,
        "boolean" => Ty::Boolean,
        "integer" => Ty::Integer {
            minimum: bound(node, "minimum"),
            maximum: bound(node, "maximum"),
        },
        "string" => Ty::String {
            format: text(node, "format"),
            pattern: text(node, "pattern"),
        },
        "array" => Ty::Array {
            items: present(node, "items").map(|items| Box::new(lower_to_schema(items))),
            default: present(node, "default")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
        },
        other => Ty::Unknown(other.to_owned()),
    }
}

// Sequences and strings enumerate by index, like any other keyed collection.
fn lower_properties(properties: Option<&Value>) -> Properties {
    let fields: IndexMap<String, Schema> = match properties {
        None => return Properties::Missing,
        Some(Value::Object(fields)) => fields
            .iter()
            .map(|(k, v)| (k.clone(), lower_to_schema(v)))
            .collect(),
        Some(Value::Array(xs)) => xs
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), lower_to_schema(v)))
            .collect(),
        Some(Value::String(s)) => (0..s.chars().count())
            .map(|i| (i.to_string(), Schema::Unrecognized))
            .collect(),
        Some(_) => return Properties::Malformed,
    };
    Properties::Declared(fields)
}
