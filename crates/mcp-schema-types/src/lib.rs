//! # MCP Schema Types
//!
//! Core types shared by the schema compiler (`mcp-schema`) and the DSL
//! derive macro (`mcp-schema-macros`): primitive type tags, the recursive
//! type-expression tree, the raw (uninterpreted) declaration list a schema
//! author produces, and the two error regimes the compiler distinguishes
//! (build-time `SchemaError`, runtime `ValidationError`).
//!
//! Nothing in this crate interprets a declaration — that is the normalizer's
//! job, in `mcp-schema`. This crate only defines the shapes everyone agrees on.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod field;
pub mod primitive;
pub mod raw;

pub use error::{ErrorKind, SchemaError, ValidationError};
pub use field::{Constraint, Field, Metadata, TypeExpr};
pub use primitive::PrimitiveType;
pub use raw::{RawField, RawType};
