//! Primitive type tags.

use std::fmt;

/// A leaf type a field can hold, before any constraint or enum wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    /// UTF-8 text.
    String,
    /// A whole number; JSON integers only.
    Integer,
    /// A floating point number; accepts JSON integers and floats.
    Float,
    /// `true`/`false`.
    Boolean,
    /// Accepts any JSON value.
    Any,
    /// An ISO-8601 calendar date (`YYYY-MM-DD`).
    Date,
    /// An ISO-8601 time of day.
    Time,
    /// An ISO-8601 timestamp with an offset.
    Datetime,
    /// An ISO-8601 timestamp with no offset.
    NaiveDatetime,
}

impl PrimitiveType {
    /// Parse a primitive from the lowercase name used in the DSL
    /// (`"string"`, `"integer"`, `"naive_datetime"`, ...).
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "string" => Self::String,
            "integer" => Self::Integer,
            "float" => Self::Float,
            "boolean" => Self::Boolean,
            "any" => Self::Any,
            "date" => Self::Date,
            "time" => Self::Time,
            "datetime" => Self::Datetime,
            "naive_datetime" => Self::NaiveDatetime,
            _ => return None,
        })
    }

    /// The lowercase DSL name for this primitive.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Any => "any",
            Self::Date => "date",
            Self::Time => "time",
            Self::Datetime => "datetime",
            Self::NaiveDatetime => "naive_datetime",
        }
    }

    /// Whether this primitive supports numeric (`min`/`max`) constraints.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// Whether this primitive supports string-length (`min_length`/`max_length`) constraints.
    pub fn is_string_like(self) -> bool {
        matches!(self, Self::String)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
