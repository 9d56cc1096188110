//! End-to-end build → emit → validate round trips against the literal
//! scenarios a schema author would actually write.

use mcp_schema::{FieldSpec, SchemaBuilder};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn numeric_range_accept_and_reject() {
    let schema = SchemaBuilder::new()
        .field("count", FieldSpec::integer().min(10.0).max(100.0))
        .build()
        .unwrap();

    let ok = schema.validate(&json!({"count": 50})).unwrap();
    assert_eq!(ok.get("count"), Some(&json!(50)));

    let err = schema.validate(&json!({"count": 5})).unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(err[0].path, vec!["count".to_string()]);
    assert_eq!(err[0].kind, mcp_schema::ErrorKind::OutOfRange);
}

#[test]
fn nested_required_missing_reports_full_path() {
    let email_field = SchemaBuilder::new()
        .field("email", FieldSpec::string().required().format("email"))
        .fields();
    let profile_field = SchemaBuilder::new()
        .field("profile", FieldSpec::object(email_field).required())
        .fields();
    let schema = SchemaBuilder::new()
        .field("user", FieldSpec::object(profile_field).required())
        .build()
        .unwrap();

    let errs = schema.validate(&json!({"user": {"profile": {}}})).unwrap_err();
    assert!(errs
        .iter()
        .any(|e| e.path == vec!["user".to_string(), "profile".to_string(), "email".to_string()]
            && e.kind == mcp_schema::ErrorKind::MissingRequired));
}

#[test]
fn enum_via_values_rejects_unlisted_members_and_missing_required() {
    let schema = SchemaBuilder::new()
        .field(
            "status",
            FieldSpec::string()
                .required()
                .values(vec![json!("active"), json!("inactive"), json!("pending")]),
        )
        .build()
        .unwrap();

    let errs = schema.validate(&json!({"status": "unknown"})).unwrap_err();
    assert_eq!(errs[0].path, vec!["status".to_string()]);
    assert_eq!(errs[0].kind, mcp_schema::ErrorKind::NotInEnum);

    let errs = schema.validate(&json!({})).unwrap_err();
    assert_eq!(errs[0].kind, mcp_schema::ErrorKind::MissingRequired);

    assert!(schema.validate(&json!({"status": "active"})).is_ok());
}

#[test]
fn string_length_bound_rejects_short_titles() {
    let schema = SchemaBuilder::new()
        .field("title", FieldSpec::string().min_length(5).max_length(20))
        .build()
        .unwrap();

    let errs = schema.validate(&json!({"title": "Shrt"})).unwrap_err();
    assert_eq!(errs[0].kind, mcp_schema::ErrorKind::LengthOutOfRange);

    assert!(schema.validate(&json!({"title": "A valid title"})).is_ok());
}

#[test]
fn json_schema_emission_matches_the_documented_fragment() {
    let schema = SchemaBuilder::new()
        .field(
            "username",
            FieldSpec::string()
                .required()
                .description("User's login name")
                .min_length(3)
                .max_length(12),
        )
        .field("age", FieldSpec::integer().min(0.0))
        .field("email", FieldSpec::string().required().format("email"))
        .build()
        .unwrap();

    let doc = schema.json_schema();
    assert_eq!(
        doc["properties"]["username"],
        json!({"type": "string", "description": "User's login name", "minLength": 3, "maxLength": 12})
    );
    assert_eq!(doc["properties"]["age"], json!({"type": "integer", "minimum": 0.0}));
    assert_eq!(doc["properties"]["email"], json!({"type": "string", "format": "email"}));

    let required: std::collections::HashSet<_> = doc["required"].as_array().unwrap().iter().collect();
    assert!(required.contains(&json!("username")));
    assert!(required.contains(&json!("email")));
}

#[test]
fn values_sugar_and_explicit_enum_type_emit_identically() {
    use mcp_schema_types::PrimitiveType;

    let via_values = SchemaBuilder::new()
        .field(
            "priority",
            FieldSpec::integer()
                .required()
                .values(vec![json!(1), json!(2), json!(3)])
                .type_hint(PrimitiveType::Integer),
        )
        .build()
        .unwrap();

    let via_enum = SchemaBuilder::new()
        .field(
            "priority",
            FieldSpec::enum_type(vec![json!(1), json!(2), json!(3)])
                .required()
                .type_hint(PrimitiveType::Integer),
        )
        .build()
        .unwrap();

    assert_eq!(via_values.json_schema(), via_enum.json_schema());
    assert_eq!(via_values.normalized(), via_enum.normalized());
}

#[test]
fn unknown_dsl_options_never_surface_in_either_artifact() {
    let schema = SchemaBuilder::new()
        .field("name", FieldSpec::string().opt("mystery_option", json!("anything")))
        .build()
        .unwrap();

    let props = schema.json_schema()["properties"]["name"].as_object().unwrap();
    assert!(!props.contains_key("mystery_option"));

    match schema.normalized() {
        mcp_schema_types::TypeExpr::Object(fields) => {
            assert_eq!(fields[0].1.metadata, mcp_schema_types::Metadata::new());
        }
        _ => panic!("expected object"),
    }
}
