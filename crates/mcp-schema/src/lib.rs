//! # MCP Schema
//!
//! Compiles a declarative tool/prompt input (or output) shape into three
//! artifacts that must never disagree: a normalized internal schema, a
//! draft-07-shaped JSON-Schema document for clients, and a validator that
//! turns a loose JSON input into a key-normalized parameter map or a list of
//! path-qualified errors.
//!
//! ```
//! use mcp_schema::{FieldSpec, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new()
//!     .field("count", FieldSpec::integer().required().min(10.0).max(100.0))
//!     .build()
//!     .unwrap();
//!
//! let ok = schema.validate(&serde_json::json!({"count": 50})).unwrap();
//! assert_eq!(ok.get("count"), Some(&serde_json::json!(50)));
//!
//! let errs = schema.validate(&serde_json::json!({"count": 5})).unwrap_err();
//! assert_eq!(errs.len(), 1);
//! ```
//!
//! The three components that do the work — the normalizer, the JSON-Schema
//! emitter, and the validator — only ever consult the normalized tree
//! (`mcp_schema_types::TypeExpr`/`Field`), never the raw declarations. That
//! keeps the three-way round trip (raw → normalized → {schema, validator})
//! honest: nothing downstream can special-case a surface form the normalizer
//! didn't already fuse away.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod emit;
pub mod normalize;
pub mod validate;

pub use builder::{FieldSpec, SchemaBuilder};
pub use config::SchemaConfig;
pub use mcp_schema_types::{ErrorKind, SchemaError, ValidationError};

use serde_json::Value;
use std::collections::HashMap;

/// A key-normalized, validated parameter map: the validator's success output.
pub type ParamMap = HashMap<String, Value>;

/// The three artifacts a component registry needs from a declared schema:
/// the normalized tree it validates against and the JSON-Schema document it
/// publishes to clients. Immutable once built; `Clone`, `Send`, `Sync`.
#[derive(Debug, Clone)]
pub struct BuiltSchema {
    normalized: mcp_schema_types::TypeExpr,
    json_schema: Value,
    config: SchemaConfig,
}

impl BuiltSchema {
    /// The emitted JSON-Schema document, ready to publish to a client.
    pub fn json_schema(&self) -> &Value {
        &self.json_schema
    }

    /// The normalized schema tree. Exposed mainly for tests that want to
    /// assert on shape directly rather than through JSON-Schema or validation.
    pub fn normalized(&self) -> &mcp_schema_types::TypeExpr {
        &self.normalized
    }

    /// Validate a loose JSON input against this schema, returning a
    /// key-normalized parameter map on success or every sibling error on
    /// failure. Pure: no I/O, no panics on malformed input.
    pub fn validate(&self, input: &Value) -> Result<ParamMap, Vec<ValidationError>> {
        validate::validate(&self.normalized, input, &self.config)
    }

    /// Validate a declared *output* shape the same way `validate` validates
    /// input — the output-shape validator is the same machinery under a
    /// different name, so a tool author can check outbound payloads too.
    pub fn validate_output(&self, output: &Value) -> Result<ParamMap, Vec<ValidationError>> {
        self.validate(output)
    }
}
