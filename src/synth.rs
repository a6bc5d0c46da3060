//! Schema interpreter: one schema document in, one synthesized value out.
//!
//! Each top-level call indexes the document's `$id` nodes into a fresh
//! [`DefinitionTable`], lowers the root into the typed [`Schema`] model and walks
//! it, drawing from the caller's RNG wherever the schema leaves the value open.
//!
//! Failure policy is best-effort: malformed nodes, unknown types, unresolvable
//! references and `$ref` limit hits all become an absent value at their position.
//! At the root that is `None`; inside objects and arrays it is JSON `null`, and
//! declared keys are never skipped.
pub mod arr;
pub mod num;
pub mod pattern;
pub mod str;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::definitions::{self, DefinitionTable};
use crate::ir::{Properties, Schema, Ty};
use crate::lower::lower_to_schema;

pub use arr::random_element;
pub use num::{random_bool, random_int, RANGE_MAX, RANGE_MIN};
pub use str::{random_string, RANDOM_STRING_LEN};

// ------------------------------- Policy ---------------------------------- //

/// Bound on nested `$ref` expansions; cyclic chains stop here instead of overflowing
/// the stack. Plain object, array and `anyOf` nesting is not counted.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynthOptions {
    pub max_depth: usize,
    /// Fixed seed for reproducible output; entropy-seeded when unset.
    pub seed: Option<u64>,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH, seed: None }
    }
}

// ------------------------------ Per call --------------------------------- //

/// Everything one top-level call needs. Never outlives that call.
struct Call<'a, R> {
    rng: &'a mut R,
    definitions: &'a DefinitionTable,
    max_depth: usize,
}

impl<R: Rng> Call<'_, R> {
    /// `depth` counts the `$ref` expansions enclosing `node`.
    fn interpret(&mut self, node: &Schema, depth: usize) -> Option<Value> {
        match node {
            Schema::Typed(ty) => self.interpret_type(ty, depth),
            Schema::Enum(candidates) => random_element(&mut *self.rng, candidates).cloned(),
            Schema::AnyOf(branches) => {
                let branch = random_element(&mut *self.rng, branches)?;
                self.interpret(branch, depth)
            }
            Schema::Ref(id) => {
                if depth >= self.max_depth {
                    tracing::warn!(depth, %id, "max $ref depth reached, emitting nothing");
                    return None;
                }
                let definitions = self.definitions;
                match definitions.resolve(id) {
                    Some(target) => self.interpret(target, depth + 1),
                    None => {
                        tracing::debug!(%id, "unresolved $ref");
                        None
                    }
                }
            }
            Schema::Unrecognized => None,
        }
    }

    fn interpret_type(&mut self, ty: &Ty, depth: usize) -> Option<Value> {
        match ty {
            Ty::Object { properties } => match properties {
                Properties::Declared(fields) => {
                    let out: Map<String, Value> = fields
                        .iter()
                        .map(|(key, node)| {
                            let value = self.interpret(node, depth).unwrap_or(Value::Null);
                            (key.clone(), value)
                        })
                        .collect();
                    Some(Value::Object(out))
                }
                Properties::Missing => Some(Value::Object(Map::new())),
                Properties::Malformed => {
                    tracing::debug!("object `properties` has no keys to enumerate");
                    Some(Value::Object(Map::new()))
                }
            },
            Ty::Null => Some(Value::Null),
            Ty::Boolean => Some(Value::Bool(random_bool(&mut *self.rng))),
            Ty::Integer { minimum, maximum } => {
                let max = maximum.unwrap_or(RANGE_MAX);
                let min = minimum.unwrap_or(RANGE_MIN);
                Some(Value::from(random_int(&mut *self.rng, max, min)))
            }
            Ty::String { format, pattern } => match (format, pattern) {
                (Some(_), Some(source)) => Some(Value::String(pattern::synthesize(&mut *self.rng, source))),
                _ => Some(Value::String(str::random_word(&mut *self.rng, RANDOM_STRING_LEN, false))),
            },
            Ty::Array { items, default } => {
                let mut out = default.clone();
                // at most one synthesized element, appended after the defaults
                if let Some(items) = items {
                    out.push(self.interpret(items, depth).unwrap_or(Value::Null));
                }
                Some(Value::Array(out))
            }
            Ty::Unknown(name) => {
                tracing::debug!(%name, "unsupported type");
                None
            }
        }
    }
}

/// Interpret an already-lowered node against a caller-built table.
pub fn interpret<R: Rng>(node: &Schema, definitions: &DefinitionTable, rng: &mut R) -> Option<Value> {
    Call { rng, definitions, max_depth: DEFAULT_MAX_DEPTH }.interpret(node, 0)
}

fn run<R: Rng>(document: &Value, rng: &mut R, max_depth: usize) -> Option<Value> {
    let table = definitions::index(Some(document));
    tracing::debug!(definitions = table.len(), "indexed document");
    let root = lower_to_schema(document);
    let mut call = Call { rng, definitions: &table, max_depth };
    call.interpret(&root, 0)
}

// ------------------------------- Front API -------------------------------- //

/// Synthesize one value for `document` using the thread-local RNG.
pub fn generate(document: &Value) -> Option<Value> {
    generate_with_rng(document, &mut rand::thread_rng())
}

pub fn generate_with_rng<R: Rng>(document: &Value, rng: &mut R) -> Option<Value> {
    run(document, rng, DEFAULT_MAX_DEPTH)
}

/// Reusable generator owning its RNG. Seed it for reproducible fixtures.
pub struct Synthesizer<R = StdRng> {
    rng: R,
    options: SynthOptions,
}

impl Synthesizer<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::from_options(SynthOptions { seed: Some(seed), ..SynthOptions::default() })
    }

    pub fn from_options(options: SynthOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, options }
    }
}

impl<R: Rng> Synthesizer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng, options: SynthOptions::default() }
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    pub fn options(&self) -> &SynthOptions { &self.options }

    pub fn generate(&mut self, document: &Value) -> Option<Value> {
        run(document, &mut self.rng, self.options.max_depth)
    }

    /// `count` independent top-level calls; each re-indexes the document.
    pub fn generate_many(&mut self, document: &Value, count: usize) -> Vec<Option<Value>> {
        (0..count).map(|_| self.generate(document)).collect()
    }
}

// ------------------------------- Tests ------------------------------------ //
