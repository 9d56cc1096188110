//! Layer B: the normalizer.
//!
//! Folds an ordered `Vec<RawField>` into the canonical tagged tree
//! (`mcp_schema_types::TypeExpr::Object`) that the emitter and validator
//! both compile from. This is the only place the DSL's surface duality
//! (`values: [...]` vs. an explicit `{enum, [...]}` type) gets resolved —
//! downstream code never branches on which surface an author used.
//!
//! The normalizer is total over anything the capture layer accepted: every
//! failure here is a build-time [`SchemaError`], never a runtime one.

use std::collections::HashSet;

use mcp_schema_types::{Constraint, Field, Metadata, PrimitiveType, RawField, RawType, SchemaError, TypeExpr};
use serde_json::Value;

/// Normalize one lexical scope's raw declarations into a `TypeExpr::Object`.
/// Idempotent: normalizing the output of a previous `normalize` call (there
/// being no raw form to re-derive from) is a type error at the Rust level,
/// but re-running this function on the same raw input always yields an
/// equal tree — there is no hidden, order-dependent state.
pub fn normalize(raw_fields: Vec<RawField>) -> Result<TypeExpr, SchemaError> {
    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(raw_fields.len());

    for raw in raw_fields {
        if !seen.insert(raw.name.clone()) {
            return Err(SchemaError::DuplicateField(raw.name));
        }
        let field = normalize_field(&raw)?;
        fields.push((raw.name, field));
    }

    Ok(TypeExpr::Object(fields))
}

fn normalize_field(raw: &RawField) -> Result<Field, SchemaError> {
    let base = resolve_base_type(raw)?;
    let constrained = apply_constraints(raw, base);
    let type_expr = if raw.is_required() {
        TypeExpr::Required(Box::new(constrained))
    } else {
        constrained
    };
    let metadata = build_metadata(raw, &type_expr)?;
    Ok(Field::new(type_expr, metadata))
}

/// Step 1: resolve the type, in priority order — nested body, then `values`
/// sugar, then an explicit `{enum, ...}` type, then a bare primitive.
fn resolve_base_type(raw: &RawField) -> Result<TypeExpr, SchemaError> {
    if let RawType::Object(nested) = &raw.raw_type {
        if raw.opt("type").is_some() {
            return Err(SchemaError::NestedObjectWithExplicitType(raw.name.clone()));
        }
        return normalize(nested.clone());
    }

    if let Some(Value::Array(values)) = raw.opt("values") {
        if matches!(raw.raw_type, RawType::Enum(_)) {
            return Err(SchemaError::ValuesWithExplicitEnum(raw.name.clone()));
        }
        return Ok(TypeExpr::Enum(values.clone()));
    }

    match &raw.raw_type {
        RawType::Enum(values) => Ok(TypeExpr::Enum(values.clone())),
        RawType::Prim(p) => Ok(TypeExpr::Prim(*p)),
        RawType::Object(_) => unreachable!("handled above"),
    }
}

/// Step 2: fold `min`/`max`/`min_length`/`max_length` onto the base type.
/// Enums are validated by membership alone, so a bound never attaches to one
/// here — redundant with the fixed value set — and `Object` bases never take
/// a bound either. A bound that doesn't match its primitive's shape (e.g.
/// `min_length` on an integer) is silently dropped rather than rejected —
/// see the Open Questions resolution.
fn apply_constraints(raw: &RawField, base: TypeExpr) -> TypeExpr {
    let TypeExpr::Prim(prim) = base else {
        return base;
    };

    let min = raw.opt("min").and_then(Value::as_f64);
    let max = raw.opt("max").and_then(Value::as_f64);
    let min_len = raw.opt("min_length").and_then(Value::as_u64).map(|n| n as usize);
    let max_len = raw.opt("max_length").and_then(Value::as_u64).map(|n| n as usize);

    if prim.is_numeric() {
        let constraint = match (min, max) {
            (Some(a), Some(b)) => Some(Constraint::Range(a, b)),
            (Some(a), None) => Some(Constraint::Gte(a)),
            (None, Some(b)) => Some(Constraint::Lte(b)),
            (None, None) => None,
        };
        if let Some(c) = constraint {
            return TypeExpr::Constrained(Box::new(TypeExpr::Prim(prim)), c);
        }
    } else if prim.is_string_like() {
        let constraint = match (min_len, max_len) {
            (Some(a), Some(b)) => Some(Constraint::LenRange(a, b)),
            (Some(a), None) => Some(Constraint::MinLen(a)),
            (None, Some(b)) => Some(Constraint::MaxLen(b)),
            (None, None) => None,
        };
        if let Some(c) = constraint {
            return TypeExpr::Constrained(Box::new(TypeExpr::Prim(prim)), c);
        }
    }

    TypeExpr::Prim(prim)
}

/// Step 4: keep only recognized metadata keys, in the order they're defined
/// here (description, default, format, then the enum base primitive).
/// `min`/`max`/`min_length`/`max_length`/`required`/`values`/`type` were
/// already consumed above and never reach this point, and anything else the
/// capture layer accepted (an unknown option key) is simply never looked at.
fn build_metadata(raw: &RawField, type_expr: &TypeExpr) -> Result<Metadata, SchemaError> {
    let description = raw
        .opt("description")
        .and_then(Value::as_str)
        .map(str::to_string);
    let default = raw.opt("default").cloned();
    let format = raw.opt("format").and_then(Value::as_str).map(str::to_string);

    let is_enum = matches!(type_expr.unwrap_required(), TypeExpr::Enum(_))
        || matches!(
            type_expr.unwrap_required(),
            TypeExpr::Constrained(inner, _) if matches!(inner.as_ref(), TypeExpr::Enum(_))
        );

    let enum_base = if is_enum {
        let name = raw.opt("type").and_then(Value::as_str).unwrap_or("string");
        let prim = PrimitiveType::parse(name).ok_or_else(|| SchemaError::UnknownPrimitiveType {
            field: raw.name.clone(),
            type_name: name.to_string(),
        })?;
        Some(prim)
    } else {
        None
    };

    Ok(Metadata {
        description,
        default,
        format,
        enum_base,
    })
}
