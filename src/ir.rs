// Strongly-typed schema model. Raw documents are lowered into this once per call.

use indexmap::IndexMap;
use serde_json::Value;

/// Keys that carry schema structure; never treated as ordinary data.
pub const RESERVED_KEYS: [&str; 18] = [
    "id", "$id", "type", "properties", "enum", "anyOf", "$ref", "default", "format",
    "pattern", "minimum", "maximum", "exclusiveMinimum", "required", "items", "minItems",
    "uniqueItems", "definitions",
];

pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// One schema node. Exactly one discriminant wins: `type > enum > anyOf > $ref`.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Typed(Ty),
    Enum(Vec<Value>),        // empty when `enum` was not an array
    AnyOf(Vec<Schema>),      // empty when `anyOf` was not an array
    Ref(String),
    Unrecognized,            // no discriminant, or not an object at all
}

#[derive(Debug, Clone, PartialEq)]
pub enum Ty {
    Object { properties: Properties },
    Null,
    Boolean,
    /// Inclusive bounds, raw from the document; rounding happens at draw time.
    Integer { minimum: Option<f64>, maximum: Option<f64> },
    /// Pattern synthesis only kicks in when both are set.
    String { format: Option<String>, pattern: Option<String> },
    Array {
        items: Option<Box<Schema>>,
        default: Vec<Value>,     // initial output contents
    },
    /// `type` was present but names nothing we synthesize.
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Properties {
    Declared(IndexMap<String, Schema>),  // document order
    Missing,
    Malformed,                           // `properties` is a scalar: no keys
}

impl Schema {
    pub fn type_name(&self) -> &str {
        match self {
            Schema::Typed(ty) => ty.name(),
            Schema::Enum(_) => "enum",
            Schema::AnyOf(_) => "anyOf",
            Schema::Ref(_) => "$ref",
            Schema::Unrecognized => "unrecognized",
        }
    }
}

impl Ty {
    pub fn name(&self) -> &str {
        match self {
            Ty::Object { .. } => "object",
            Ty::Null => "null",
            Ty::Boolean => "boolean",
            Ty::Integer { .. } => "integer",
            Ty::String { .. } => "string",
            Ty::Array { .. } => "array",
            Ty::Unknown(name) => name,
        }
    }
}
