//! Two error regimes, deliberately kept apart: [`SchemaError`] for
//! build-time (programmer) mistakes that abort construction, and
//! [`ValidationError`] for runtime (data) problems that are returned as
//! plain values from the validator, never thrown.

use serde_json::Value;
use std::fmt;

/// A programmer error found while building a schema from raw declarations.
/// Always a build-time failure; never produced by [`ValidationError`]'s
/// machinery.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// A nested object field also declared an explicit primitive type.
    #[error("field `{0}` is a nested object and cannot declare an explicit type")]
    NestedObjectWithExplicitType(String),

    /// A field combined `values: [...]` sugar with an explicit `{enum, ...}` type.
    #[error("field `{0}` combines `values` with an explicit enum type")]
    ValuesWithExplicitEnum(String),

    /// A field declared a primitive type name the compiler does not recognize.
    #[error("field `{field}` declares unknown primitive type `{type_name}`")]
    UnknownPrimitiveType {
        /// The offending field's name.
        field: String,
        /// The unrecognized type name as written.
        type_name: String,
    },

    /// A schema declared the same field name twice at the same level.
    #[error("duplicate field `{0}` in the same schema")]
    DuplicateField(String),
}

/// The kind of runtime validation failure. Carried by [`ValidationError`]
/// alongside the path at which it occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A `Required` field was absent from the input.
    MissingRequired,
    /// The input's JSON type didn't match the field's declared type.
    TypeMismatch,
    /// A numeric value fell outside its `Gte`/`Lte`/`Range` bound.
    OutOfRange,
    /// A string's `char` length fell outside its length bound.
    LengthOutOfRange,
    /// A value wasn't a member of its field's enum.
    NotInEnum,
    /// An object-typed field (or the top-level input) wasn't a JSON object.
    ExpectedObject,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MissingRequired => "missing_required",
            Self::TypeMismatch => "type_mismatch",
            Self::OutOfRange => "out_of_range",
            Self::LengthOutOfRange => "length_out_of_range",
            Self::NotInEnum => "not_in_enum",
            Self::ExpectedObject => "expected_object",
        };
        f.write_str(s)
    }
}

/// A single runtime validation failure, path-qualified so a caller can
/// report exactly which (possibly nested) field was at fault. These are
/// plain data: the validator never panics or returns a `Result` whose `Err`
/// is this type wrapped in a single-error envelope — it always returns
/// `Vec<ValidationError>`, one entry per sibling failure.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidationError {
    /// The field path, outermost first. Empty for a top-level-input failure.
    pub path: Vec<String>,
    /// What went wrong.
    pub kind: ErrorKind,
    /// Extra detail (bounds, the offending value, the expected type) for
    /// callers that want to render a precise message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl ValidationError {
    /// Build an error with no extra context.
    pub fn new(path: Vec<String>, kind: ErrorKind) -> Self {
        Self {
            path,
            kind,
            context: None,
        }
    }

    /// Attach context (a bound, an offending value, an expected-type label).
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    /// The path joined with `.`, e.g. `"user.profile.email"`, or `"<root>"`
    /// for an empty path.
    pub fn dotted_path(&self) -> String {
        if self.path.is_empty() {
            "<root>".to_string()
        } else {
            self.path.join(".")
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(ctx) => write!(f, "{} at {}: {}", self.kind, self.dotted_path(), ctx),
            None => write!(f, "{} at {}", self.kind, self.dotted_path()),
        }
    }
}

impl std::error::Error for ValidationError {}
