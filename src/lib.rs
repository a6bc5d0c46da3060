//! Synthesize mock JSON values from JSON-Schema-like documents.
//!
//! ```
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "array",
//!     "default": [1, 2],
//!     "items": { "type": "integer", "minimum": 5, "maximum": 5 }
//! });
//! assert_eq!(json_mock::generate(&schema), Some(json!([1, 2, 5])));
//! ```
pub mod cli;
pub mod definitions;
pub mod error;
pub mod ir;
pub mod lower;
pub mod path_de;
pub mod synth;

pub use definitions::{index, DefinitionTable};
pub use error::Error;
pub use ir::{Schema, Ty};
pub use synth::{generate, generate_with_rng, interpret, SynthOptions, Synthesizer};
