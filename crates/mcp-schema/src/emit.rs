//! Layer C: the JSON-Schema emitter.
//!
//! A pure, depth-first walk over the normalized tree producing a
//! draft-07-shaped JSON document. Every branch here is structural — there is
//! no DSL-surface knowledge left by the time a tree reaches this module,
//! only `TypeExpr`/`Field`/`Metadata`.

use mcp_schema_types::{Constraint, Metadata, PrimitiveType, TypeExpr};
use serde_json::{Map, Value};

/// Emit a normalized root (expected to be a `TypeExpr::Object`) as a
/// JSON-Schema document.
pub fn emit(root: &TypeExpr) -> Value {
    emit_type_expr(root, &Metadata::new())
}

fn emit_type_expr(type_expr: &TypeExpr, metadata: &Metadata) -> Value {
    match type_expr {
        TypeExpr::Required(inner) => emit_type_expr(inner, metadata),
        TypeExpr::Constrained(inner, constraint) => {
            let mut value = emit_type_expr(inner, metadata);
            apply_constraint(&mut value, constraint);
            value
        }
        TypeExpr::Enum(values) => {
            let base = metadata.enum_base.unwrap_or(PrimitiveType::String);
            let mut value = json_type_object(Some(base));
            if let Value::Object(map) = &mut value {
                map.insert("enum".to_string(), Value::Array(values.clone()));
            }
            apply_metadata(&mut value, metadata);
            value
        }
        TypeExpr::Prim(prim) => {
            let mut value = json_type_object(Some(*prim));
            apply_default_format(&mut value, *prim);
            apply_metadata(&mut value, metadata);
            value
        }
        TypeExpr::Object(fields) => {
            let mut properties = Map::new();
            let mut required = Vec::new();
            for (name, field) in fields {
                if field.is_required() {
                    required.push(Value::String(name.clone()));
                }
                properties.insert(name.clone(), emit_type_expr(&field.type_expr, &field.metadata));
            }
            let mut map = Map::new();
            map.insert("type".to_string(), Value::String("object".to_string()));
            map.insert("properties".to_string(), Value::Object(properties));
            if !required.is_empty() {
                map.insert("required".to_string(), Value::Array(required));
            }
            let mut value = Value::Object(map);
            apply_metadata(&mut value, metadata);
            value
        }
    }
}

/// `PrimitiveType::Any` has no JSON-Schema `"type"` restriction at all — an
/// empty schema accepts anything — so it's the one primitive that produces
/// `{}` rather than `{"type": ...}`.
fn json_type_object(prim: Option<PrimitiveType>) -> Value {
    let mut map = Map::new();
    if let Some(prim) = prim {
        if let Some(json_type) = json_type_name(prim) {
            map.insert("type".to_string(), Value::String(json_type.to_string()));
        }
    }
    Value::Object(map)
}

fn json_type_name(prim: PrimitiveType) -> Option<&'static str> {
    match prim {
        PrimitiveType::String => Some("string"),
        PrimitiveType::Integer => Some("integer"),
        PrimitiveType::Float => Some("number"),
        PrimitiveType::Boolean => Some("boolean"),
        PrimitiveType::Any => None,
        PrimitiveType::Date | PrimitiveType::Time | PrimitiveType::Datetime | PrimitiveType::NaiveDatetime => {
            Some("string")
        }
    }
}

/// Date/time primitives carry an implied `"format"` unless the author set
/// one explicitly via [`Metadata::format`] — applied here, before
/// [`apply_metadata`] so an explicit format always wins.
fn apply_default_format(value: &mut Value, prim: PrimitiveType) {
    let implied = match prim {
        PrimitiveType::Date => Some("date"),
        PrimitiveType::Time => Some("time"),
        PrimitiveType::Datetime | PrimitiveType::NaiveDatetime => Some("date-time"),
        _ => None,
    };
    if let (Some(format), Value::Object(map)) = (implied, value) {
        map.insert("format".to_string(), Value::String(format.to_string()));
    }
}

fn apply_constraint(value: &mut Value, constraint: &Constraint) {
    let Value::Object(map) = value else { return };
    match constraint {
        Constraint::Gte(min) => {
            map.insert("minimum".to_string(), serde_json::json!(min));
        }
        Constraint::Lte(max) => {
            map.insert("maximum".to_string(), serde_json::json!(max));
        }
        Constraint::Range(min, max) => {
            map.insert("minimum".to_string(), serde_json::json!(min));
            map.insert("maximum".to_string(), serde_json::json!(max));
        }
        Constraint::MinLen(min) => {
            map.insert("minLength".to_string(), serde_json::json!(min));
        }
        Constraint::MaxLen(max) => {
            map.insert("maxLength".to_string(), serde_json::json!(max));
        }
        Constraint::LenRange(min, max) => {
            map.insert("minLength".to_string(), serde_json::json!(min));
            map.insert("maxLength".to_string(), serde_json::json!(max));
        }
    }
}

fn apply_metadata(value: &mut Value, metadata: &Metadata) {
    let Value::Object(map) = value else { return };
    if let Some(description) = &metadata.description {
        map.insert("description".to_string(), Value::String(description.clone()));
    }
    if let Some(default) = &metadata.default {
        map.insert("default".to_string(), default.clone());
    }
    if let Some(format) = &metadata.format {
        map.insert("format".to_string(), Value::String(format.clone()));
    }
}
