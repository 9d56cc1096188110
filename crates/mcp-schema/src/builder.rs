//! Layer A: raw schema capture.
//!
//! [`SchemaBuilder`] and [`FieldSpec`] are the builder-API realization of the
//! DSL surface — the "always available" fallback the design notes call for
//! next to the `#[derive(McpSchema)]` macro in `mcp-schema-macros`. Both
//! surfaces terminate in the exact same thing: an ordered
//! `Vec<mcp_schema_types::RawField>`. Nothing here interprets a declaration;
//! that happens in [`crate::normalize`].

use mcp_schema_types::{PrimitiveType, RawField, RawType};
use serde_json::Value;

use crate::{config::SchemaConfig, emit, normalize, BuiltSchema, SchemaError};

/// A single field's raw declaration, under construction. Each builder method
/// records one `(key, value)` option in author-given order — exactly the
/// "keyword options" shape the source DSL's `field(name, type, opts)` call
/// produces — so unrecognized keys survive capture and can be demonstrated
/// (and tested) to vanish during normalization rather than being rejected
/// outright here.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    raw_type: RawType,
    opts: Vec<(String, Value)>,
}

impl FieldSpec {
    fn leaf(prim: PrimitiveType) -> Self {
        Self {
            raw_type: RawType::Prim(prim),
            opts: Vec::new(),
        }
    }

    /// `field(name, "string", ...)`.
    pub fn string() -> Self {
        Self::leaf(PrimitiveType::String)
    }

    /// `field(name, "integer", ...)`.
    pub fn integer() -> Self {
        Self::leaf(PrimitiveType::Integer)
    }

    /// `field(name, "float", ...)`.
    pub fn float() -> Self {
        Self::leaf(PrimitiveType::Float)
    }

    /// `field(name, "boolean", ...)`.
    pub fn boolean() -> Self {
        Self::leaf(PrimitiveType::Boolean)
    }

    /// `field(name, "any", ...)`.
    pub fn any() -> Self {
        Self::leaf(PrimitiveType::Any)
    }

    /// `field(name, "date", ...)`.
    pub fn date() -> Self {
        Self::leaf(PrimitiveType::Date)
    }

    /// `field(name, "time", ...)`.
    pub fn time() -> Self {
        Self::leaf(PrimitiveType::Time)
    }

    /// `field(name, "datetime", ...)`.
    pub fn datetime() -> Self {
        Self::leaf(PrimitiveType::Datetime)
    }

    /// `field(name, "naive_datetime", ...)`.
    pub fn naive_datetime() -> Self {
        Self::leaf(PrimitiveType::NaiveDatetime)
    }

    /// The explicit `{enum, [...]}` surface, distinct from the `values:`
    /// sugar applied via [`FieldSpec::values`] — the normalizer fuses both
    /// into the same normalized `Enum`.
    pub fn enum_type(values: Vec<Value>) -> Self {
        Self {
            raw_type: RawType::Enum(values),
            opts: Vec::new(),
        }
    }

    /// A nested object field, whose body is itself a raw declaration list
    /// (see [`SchemaBuilder::fields`]).
    pub fn object(fields: Vec<RawField>) -> Self {
        Self {
            raw_type: RawType::Object(fields),
            opts: Vec::new(),
        }
    }

    /// Record an arbitrary `(key, value)` option. The typed methods below
    /// are sugar over this; use it directly for forward-compatible or
    /// DSL-supplied keys the builder has no named method for.
    pub fn opt(mut self, key: impl Into<String>, value: Value) -> Self {
        self.opts.push((key.into(), value));
        self
    }

    /// `required: true`.
    pub fn required(self) -> Self {
        self.opt("required", Value::Bool(true))
    }

    /// `description: "..."`.
    pub fn description(self, description: impl Into<String>) -> Self {
        self.opt("description", Value::String(description.into()))
    }

    /// `default: ...`.
    pub fn default_value(self, default: Value) -> Self {
        self.opt("default", default)
    }

    /// `format: "..."` (a JSON-Schema format hint such as `"email"`).
    pub fn format(self, format: impl Into<String>) -> Self {
        self.opt("format", Value::String(format.into()))
    }

    /// `min: n` (numeric lower bound).
    pub fn min(self, min: f64) -> Self {
        self.opt("min", serde_json::json!(min))
    }

    /// `max: n` (numeric upper bound).
    pub fn max(self, max: f64) -> Self {
        self.opt("max", serde_json::json!(max))
    }

    /// `min_length: n` (string length lower bound).
    pub fn min_length(self, min_length: usize) -> Self {
        self.opt("min_length", serde_json::json!(min_length))
    }

    /// `max_length: n` (string length upper bound).
    pub fn max_length(self, max_length: usize) -> Self {
        self.opt("max_length", serde_json::json!(max_length))
    }

    /// `values: [...]` — sugar for an enum, fused with [`FieldSpec::enum_type`]
    /// by the normalizer.
    pub fn values(self, values: Vec<Value>) -> Self {
        self.opt("values", Value::Array(values))
    }

    /// `type: <primitive>` — only meaningful alongside `values`/`{enum, ...}`,
    /// naming the enum's base primitive (defaults to `string` if omitted).
    pub fn type_hint(self, primitive: PrimitiveType) -> Self {
        self.opt("type", Value::String(primitive.name().to_string()))
    }

    fn into_raw(self, name: impl Into<String>) -> RawField {
        RawField {
            name: name.into(),
            raw_type: self.raw_type,
            opts: self.opts,
        }
    }
}

/// Accumulates an ordered list of [`RawField`] declarations — one lexical
/// scope of the DSL's `schema` block — and, at the top level, compiles them
/// into a [`BuiltSchema`].
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    fields: Vec<RawField>,
}

impl SchemaBuilder {
    /// An empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field in this scope.
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.push(spec.into_raw(name));
        self
    }

    /// Close this scope, returning its raw declarations — used to build the
    /// body of a [`FieldSpec::object`] nested field.
    pub fn fields(self) -> Vec<RawField> {
        self.fields
    }

    /// Normalize and emit this scope as a top-level schema, producing the
    /// two artifacts a component registry needs. Fails with [`SchemaError`]
    /// on any build-time (programmer) mistake: a nested object declaring an
    /// explicit primitive type, `values` combined with an explicit
    /// `{enum, ...}` type, an unrecognized primitive name, or a duplicate
    /// field name at the same level.
    pub fn build(self) -> Result<BuiltSchema, SchemaError> {
        self.build_with_config(SchemaConfig::default())
    }

    /// Like [`SchemaBuilder::build`], with an explicit runtime config
    /// (currently just the maximum validation nesting depth).
    pub fn build_with_config(self, config: SchemaConfig) -> Result<BuiltSchema, SchemaError> {
        let normalized = normalize::normalize(self.fields)?;
        let field_count = match &normalized {
            mcp_schema_types::TypeExpr::Object(fields) => fields.len(),
            _ => 0,
        };
        tracing::debug!(field_count, "built schema");
        let json_schema = emit::emit(&normalized);
        Ok(BuiltSchema {
            normalized,
            json_schema,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_a_flat_schema() {
        let schema = SchemaBuilder::new()
            .field("count", FieldSpec::integer().required().min(10.0).max(100.0))
            .build()
            .unwrap();
        assert!(schema.validate(&json!({"count": 50})).is_ok());
    }

    #[test]
    fn nested_object_round_trips_through_fields() {
        let email_field = SchemaBuilder::new()
            .field(
                "email",
                FieldSpec::string().required().format("email"),
            )
            .fields();
        let profile_field = SchemaBuilder::new()
            .field("profile", FieldSpec::object(email_field).required())
            .fields();
        let schema = SchemaBuilder::new()
            .field("user", FieldSpec::object(profile_field).required())
            .build()
            .unwrap();

        let errs = schema
            .validate(&json!({"user": {"profile": {}}}))
            .unwrap_err();
        assert!(errs.iter().any(|e| e.path == vec!["user", "profile", "email"]));
    }

    #[test]
    fn unknown_option_keys_survive_capture_but_are_dropped_on_build() {
        let schema = SchemaBuilder::new()
            .field("name", FieldSpec::string().opt("nonsense", json!(42)))
            .build()
            .unwrap();
        let properties = schema.json_schema()["properties"]["name"].as_object().unwrap();
        assert!(!properties.contains_key("nonsense"));
    }
}
