//! Layer A output: an ordered, uninterpreted list of raw declarations.
//!
//! Nothing here is resolved yet — not the constraint folding, not the
//! `required` lift, not the enum/primitive fusion. That is the normalizer's
//! job (`mcp_schema::normalize`). A [`RawField`] is exactly what an author
//! wrote, whether they wrote it through [`mcp_schema::SchemaBuilder`] or
//! through `#[derive(McpSchema)]`.

use serde_json::Value;

use crate::primitive::PrimitiveType;

/// The declared shape of a raw field, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawType {
    /// A bare primitive (`field age integer`).
    Prim(PrimitiveType),
    /// An explicit `{enum, [...]}` type, distinct from the `values:` option
    /// sugar — the normalizer fuses both into the same [`crate::TypeExpr::Enum`].
    Enum(Vec<Value>),
    /// A nested object; its body is itself an ordered list of raw fields.
    Object(Vec<RawField>),
}

/// One declaration captured from the DSL surface (builder call or derive
/// macro field), carrying its options as an ordered, string-keyed list —
/// exactly the "keyword options" shape the source DSL's `field(name, type,
/// opts)` call produces. Recognized keys are interpreted by the normalizer;
/// everything else is carried along only so the normalizer can demonstrate
/// (and tests can assert) that it drops them.
#[derive(Debug, Clone, PartialEq)]
pub struct RawField {
    /// The field's name.
    pub name: String,
    /// The field's declared raw type.
    pub raw_type: RawType,
    /// Options in author-given order, as `(key, value)` pairs.
    pub opts: Vec<(String, Value)>,
}

impl RawField {
    /// Start a raw field with a name and type and no options yet.
    pub fn new(name: impl Into<String>, raw_type: RawType) -> Self {
        Self {
            name: name.into(),
            raw_type,
            opts: Vec::new(),
        }
    }

    /// Push a single `(key, value)` option, preserving declaration order.
    /// Later calls with the same key shadow earlier ones on lookup but both
    /// remain in the list (mirrors a keyword list, not a map).
    pub fn with_opt(mut self, key: impl Into<String>, value: Value) -> Self {
        self.opts.push((key.into(), value));
        self
    }

    /// The last value recorded for `key`, if any.
    pub fn opt(&self, key: &str) -> Option<&Value> {
        self.opts.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// `true` if `field_name` has `required: true` recorded.
    pub fn is_required(&self) -> bool {
        matches!(self.opt("required"), Some(Value::Bool(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn later_option_shadows_earlier_on_lookup_but_both_remain() {
        let f = RawField::new("count", RawType::Prim(PrimitiveType::Integer))
            .with_opt("min", json!(1))
            .with_opt("min", json!(10));
        assert_eq!(f.opt("min"), Some(&json!(10)));
        assert_eq!(f.opts.len(), 2);
    }

    #[test]
    fn is_required_defaults_false() {
        let f = RawField::new("name", RawType::Prim(PrimitiveType::String));
        assert!(!f.is_required());
        let f = f.with_opt("required", json!(true));
        assert!(f.is_required());
    }
}
