//! Layer D: the runtime validator.
//!
//! Walks a normalized tree against a loose JSON input, collecting every
//! sibling failure rather than stopping at the first one — a caller fixing
//! three bad fields at once should see three errors, not one followed by
//! two more round trips. Never panics on malformed input; a `TypeMismatch`
//! or `ExpectedObject` error is how "the shape was wrong" gets reported.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use mcp_schema_types::{Constraint, ErrorKind, Metadata, PrimitiveType, TypeExpr, ValidationError};
use serde_json::{json, Value};

use crate::{config::SchemaConfig, ParamMap};

/// Validate `input` against `root` (expected to be a `TypeExpr::Object`),
/// returning a key-normalized parameter map on success or every collected
/// error on failure.
pub fn validate(root: &TypeExpr, input: &Value, config: &SchemaConfig) -> Result<ParamMap, Vec<ValidationError>> {
    let TypeExpr::Object(fields) = root else {
        // A schema is always built from a top-level scope, so this never
        // happens outside of hand-constructed trees in tests.
        return Ok(ParamMap::new());
    };

    let mut errors = Vec::new();
    let mut path = Vec::new();
    let map = validate_object_fields(fields, input, 0, config, &mut path, &mut errors);

    if errors.is_empty() {
        Ok(map)
    } else {
        Err(errors)
    }
}

fn validate_object_fields(
    fields: &[(String, mcp_schema_types::Field)],
    value: &Value,
    depth: usize,
    config: &SchemaConfig,
    path: &mut Vec<String>,
    errors: &mut Vec<ValidationError>,
) -> ParamMap {
    let mut result = HashMap::new();

    let Some(obj) = value.as_object() else {
        errors.push(ValidationError::new(path.clone(), ErrorKind::ExpectedObject));
        return result;
    };

    for (name, field) in fields {
        path.push(name.clone());
        match obj.get(name) {
            Some(v) => {
                if let Some(coerced) = validate_field_value(&field.type_expr, &field.metadata, v, depth, config, path, errors) {
                    result.insert(name.clone(), coerced);
                }
            }
            None => {
                // `default` is descriptive metadata projected into the JSON-Schema
                // output only; the validator never substitutes it in. A missing
                // optional field is simply absent from the result map.
                if field.is_required() {
                    errors.push(ValidationError::new(path.clone(), ErrorKind::MissingRequired));
                }
            }
        }
        path.pop();
    }

    result
}

fn validate_field_value(
    type_expr: &TypeExpr,
    metadata: &Metadata,
    value: &Value,
    depth: usize,
    config: &SchemaConfig,
    path: &mut Vec<String>,
    errors: &mut Vec<ValidationError>,
) -> Option<Value> {
    match type_expr {
        TypeExpr::Required(inner) => validate_field_value(inner, metadata, value, depth, config, path, errors),
        TypeExpr::Constrained(inner, constraint) => {
            let coerced = validate_field_value(inner, metadata, value, depth, config, path, errors)?;
            if constraint_satisfied(&coerced, constraint, path, errors) {
                Some(coerced)
            } else {
                None
            }
        }
        TypeExpr::Enum(values) => {
            if values.iter().any(|allowed| allowed == value) {
                Some(value.clone())
            } else {
                errors.push(
                    ValidationError::new(path.clone(), ErrorKind::NotInEnum)
                        .with_context(json!({"allowed": values, "got": value})),
                );
                None
            }
        }
        TypeExpr::Prim(prim) => validate_primitive(*prim, value, path, errors),
        TypeExpr::Object(fields) => {
            if depth + 1 >= config.max_depth {
                errors.push(
                    ValidationError::new(path.clone(), ErrorKind::TypeMismatch)
                        .with_context(json!({"reason": "maximum nesting depth exceeded"})),
                );
                return None;
            }
            let nested = validate_object_fields(fields, value, depth + 1, config, path, errors);
            Some(serde_json::to_value(nested).expect("a ParamMap of Values always serializes"))
        }
    }
}

fn validate_primitive(
    prim: PrimitiveType,
    value: &Value,
    path: &[String],
    errors: &mut Vec<ValidationError>,
) -> Option<Value> {
    let mismatch = |errors: &mut Vec<ValidationError>| {
        errors.push(
            ValidationError::new(path.to_vec(), ErrorKind::TypeMismatch)
                .with_context(json!({"expected": prim.name()})),
        );
    };

    match prim {
        PrimitiveType::String => match value.as_str() {
            Some(_) => Some(value.clone()),
            None => {
                mismatch(errors);
                None
            }
        },
        PrimitiveType::Integer => {
            if value.is_i64() || value.is_u64() {
                Some(value.clone())
            } else {
                mismatch(errors);
                None
            }
        }
        PrimitiveType::Float => {
            if value.is_number() {
                Some(value.clone())
            } else {
                mismatch(errors);
                None
            }
        }
        PrimitiveType::Boolean => match value.as_bool() {
            Some(_) => Some(value.clone()),
            None => {
                mismatch(errors);
                None
            }
        },
        PrimitiveType::Any => Some(value.clone()),
        PrimitiveType::Date => validate_temporal(value, path, errors, prim, |s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|_| ())
        }),
        PrimitiveType::Time => validate_temporal(value, path, errors, prim, |s| {
            NaiveTime::parse_from_str(s, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S%.f"))
                .map(|_| ())
        }),
        PrimitiveType::Datetime => validate_temporal(value, path, errors, prim, |s| {
            DateTime::parse_from_rfc3339(s).map(|_| ())
        }),
        PrimitiveType::NaiveDatetime => validate_temporal(value, path, errors, prim, |s| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
                .map(|_| ())
        }),
    }
}

fn validate_temporal<E>(
    value: &Value,
    path: &[String],
    errors: &mut Vec<ValidationError>,
    prim: PrimitiveType,
    parse: impl FnOnce(&str) -> Result<(), E>,
) -> Option<Value> {
    let Some(s) = value.as_str() else {
        errors.push(
            ValidationError::new(path.to_vec(), ErrorKind::TypeMismatch)
                .with_context(json!({"expected": prim.name()})),
        );
        return None;
    };
    match parse(s) {
        Ok(()) => Some(value.clone()),
        Err(_) => {
            errors.push(
                ValidationError::new(path.to_vec(), ErrorKind::TypeMismatch)
                    .with_context(json!({"expected": prim.name(), "got": s})),
            );
            None
        }
    }
}

/// Returns `false` (having already pushed the error) when the bound is
/// violated. The primitive-level check already guaranteed `value` is the
/// right JSON shape for `constraint` to apply to.
fn constraint_satisfied(value: &Value, constraint: &Constraint, path: &[String], errors: &mut Vec<ValidationError>) -> bool {
    match constraint {
        Constraint::Gte(min) => {
            let n = value.as_f64().unwrap_or(f64::NAN);
            if n >= *min {
                true
            } else {
                errors.push(
                    ValidationError::new(path.to_vec(), ErrorKind::OutOfRange)
                        .with_context(json!({"min": min, "got": n})),
                );
                false
            }
        }
        Constraint::Lte(max) => {
            let n = value.as_f64().unwrap_or(f64::NAN);
            if n <= *max {
                true
            } else {
                errors.push(
                    ValidationError::new(path.to_vec(), ErrorKind::OutOfRange)
                        .with_context(json!({"max": max, "got": n})),
                );
                false
            }
        }
        Constraint::Range(min, max) => {
            let n = value.as_f64().unwrap_or(f64::NAN);
            if n >= *min && n <= *max {
                true
            } else {
                errors.push(
                    ValidationError::new(path.to_vec(), ErrorKind::OutOfRange)
                        .with_context(json!({"min": min, "max": max, "got": n})),
                );
                false
            }
        }
        Constraint::MinLen(min) => {
            let len = value.as_str().map(|s| s.chars().count()).unwrap_or(0);
            if len >= *min {
                true
            } else {
                errors.push(
                    ValidationError::new(path.to_vec(), ErrorKind::LengthOutOfRange)
                        .with_context(json!({"min_length": min, "got": len})),
                );
                false
            }
        }
        Constraint::MaxLen(max) => {
            let len = value.as_str().map(|s| s.chars().count()).unwrap_or(0);
            if len <= *max {
                true
            } else {
                errors.push(
                    ValidationError::new(path.to_vec(), ErrorKind::LengthOutOfRange)
                        .with_context(json!({"max_length": max, "got": len})),
                );
                false
            }
        }
        Constraint::LenRange(min, max) => {
            let len = value.as_str().map(|s| s.chars().count()).unwrap_or(0);
            if len >= *min && len <= *max {
                true
            } else {
                errors.push(
                    ValidationError::new(path.to_vec(), ErrorKind::LengthOutOfRange)
                        .with_context(json!({"min_length": min, "max_length": max, "got": len})),
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{FieldSpec, SchemaBuilder};

    #[test]
    fn missing_required_field_is_reported() {
        let schema = SchemaBuilder::new()
            .field("name", FieldSpec::string().required())
            .build()
            .unwrap();
        let errs = schema.validate(&json!({})).unwrap_err();
        assert_eq!(errs, vec![ValidationError::new(vec!["name".into()], ErrorKind::MissingRequired)]);
    }

    #[test]
    fn errors_from_sibling_fields_are_all_collected() {
        let schema = SchemaBuilder::new()
            .field("a", FieldSpec::string().required())
            .field("b", FieldSpec::integer().required())
            .build()
            .unwrap();
        let errs = schema.validate(&json!({})).unwrap_err();
        assert_eq!(errs.len(), 2);
    }

    #[test]
    fn default_is_descriptive_only_and_never_substituted_by_the_validator() {
        let schema = SchemaBuilder::new()
            .field("limit", FieldSpec::integer().default_value(json!(10)))
            .build()
            .unwrap();
        let params = schema.validate(&json!({})).unwrap();
        assert_eq!(params.get("limit"), None);
        assert_eq!(schema.json_schema()["properties"]["limit"]["default"], json!(10));
    }

    #[test]
    fn required_still_errors_even_with_a_default_present() {
        let schema = SchemaBuilder::new()
            .field("limit", FieldSpec::integer().required().default_value(json!(10)))
            .build()
            .unwrap();
        let errs = schema.validate(&json!({})).unwrap_err();
        assert_eq!(errs, vec![ValidationError::new(vec!["limit".into()], ErrorKind::MissingRequired)]);
    }

    #[test]
    fn out_of_range_number_is_reported_with_context() {
        let schema = SchemaBuilder::new()
            .field("count", FieldSpec::integer().required().min(10.0).max(100.0))
            .build()
            .unwrap();
        let errs = schema.validate(&json!({"count": 5})).unwrap_err();
        assert_eq!(errs[0].kind, ErrorKind::OutOfRange);
        assert_eq!(errs[0].path, vec!["count".to_string()]);
    }

    #[test]
    fn string_length_bounds_are_enforced() {
        let schema = SchemaBuilder::new()
            .field("title", FieldSpec::string().required().min_length(3).max_length(10))
            .build()
            .unwrap();
        assert!(schema.validate(&json!({"title": "ok"})).is_err());
        assert!(schema.validate(&json!({"title": "just right"})).is_err());
        assert!(schema.validate(&json!({"title": "fine"})).is_ok());
    }

    #[test]
    fn enum_membership_is_checked_against_literal_values() {
        let schema = SchemaBuilder::new()
            .field("status", FieldSpec::string().required().values(vec![json!("open"), json!("closed")]))
            .build()
            .unwrap();
        assert!(schema.validate(&json!({"status": "open"})).is_ok());
        let errs = schema.validate(&json!({"status": "pending"})).unwrap_err();
        assert_eq!(errs[0].kind, ErrorKind::NotInEnum);
    }

    #[test]
    fn any_primitive_accepts_every_json_shape() {
        let schema = SchemaBuilder::new()
            .field("payload", FieldSpec::any().required())
            .build()
            .unwrap();
        assert!(schema.validate(&json!({"payload": {"nested": [1, 2, 3]}})).is_ok());
        assert!(schema.validate(&json!({"payload": null})).is_ok());
    }

    #[test]
    fn date_field_rejects_malformed_strings() {
        let schema = SchemaBuilder::new()
            .field("born", FieldSpec::date().required())
            .build()
            .unwrap();
        assert!(schema.validate(&json!({"born": "2024-01-15"})).is_ok());
        let errs = schema.validate(&json!({"born": "not-a-date"})).unwrap_err();
        assert_eq!(errs[0].kind, ErrorKind::TypeMismatch);
    }

    #[test]
    fn datetime_field_accepts_rfc3339() {
        let schema = SchemaBuilder::new()
            .field("at", FieldSpec::datetime().required())
            .build()
            .unwrap();
        assert!(schema.validate(&json!({"at": "2024-01-15T10:30:00Z"})).is_ok());
        assert!(schema.validate(&json!({"at": "2024-01-15 10:30:00"})).is_err());
    }

    #[test]
    fn nested_object_errors_carry_the_full_dotted_path() {
        let inner = SchemaBuilder::new()
            .field("email", FieldSpec::string().required())
            .fields();
        let schema = SchemaBuilder::new()
            .field("user", FieldSpec::object(inner).required())
            .build()
            .unwrap();
        let errs = schema.validate(&json!({"user": {}})).unwrap_err();
        assert_eq!(errs[0].path, vec!["user".to_string(), "email".to_string()]);
        assert_eq!(errs[0].dotted_path(), "user.email");
    }

    #[test]
    fn excessive_nesting_depth_is_rejected_without_recursing_further() {
        fn nest(depth: usize) -> Value {
            if depth == 0 {
                json!({"leaf": "x"})
            } else {
                json!({"child": nest(depth - 1)})
            }
        }
        fn schema_nest(depth: usize) -> Vec<mcp_schema_types::RawField> {
            if depth == 0 {
                SchemaBuilder::new().field("leaf", FieldSpec::string().required()).fields()
            } else {
                SchemaBuilder::new()
                    .field("child", FieldSpec::object(schema_nest(depth - 1)).required())
                    .fields()
            }
        }

        let config = SchemaConfig::with_max_depth(3);
        let schema = SchemaBuilder::new()
            .field("child", FieldSpec::object(schema_nest(10)).required())
            .build_with_config(config)
            .unwrap();

        let errs = schema.validate(&nest(10)).unwrap_err();
        assert!(errs.iter().any(|e| e.kind == ErrorKind::TypeMismatch));
    }

    #[test]
    fn non_object_top_level_input_is_reported_as_expected_object() {
        let schema = SchemaBuilder::new()
            .field("name", FieldSpec::string())
            .build()
            .unwrap();
        let errs = schema.validate(&json!("not an object")).unwrap_err();
        assert_eq!(errs, vec![ValidationError::new(vec![], ErrorKind::ExpectedObject)]);
    }
}
