//! Exercises the three artifacts a component registry needs from a declared
//! schema — the normalized tree, the JSON-Schema document, and the
//! validator — end to end, standing in for the registry and request
//! dispatcher this subsystem defers to.

use mcp_schema::{FieldSpec, SchemaBuilder};
use mcp_schema_macros::McpSchema;
use serde_json::json;

#[derive(McpSchema)]
struct SearchParams {
    #[schema(required, min_length = 1, description = "The search text")]
    query: String,
    #[schema(min = 1, max = 100, default = 10, description = "Maximum results to return")]
    limit: i64,
    #[schema(values = ["relevance", "recency"], default = "relevance")]
    sort: String,
}

fn main() {
    tracing_subscriber::fmt().with_env_filter("mcp_schema=debug").init();

    let builder_schema = SchemaBuilder::new()
        .field(
            "query",
            FieldSpec::string().required().min_length(1).description("The search text"),
        )
        .field(
            "limit",
            FieldSpec::integer()
                .min(1.0)
                .max(100.0)
                .default_value(json!(10))
                .description("Maximum results to return"),
        )
        .field(
            "sort",
            FieldSpec::string()
                .values(vec![json!("relevance"), json!("recency")])
                .default_value(json!("relevance")),
        )
        .build()
        .expect("builder schema is valid");

    let derived_schema = SearchParams::mcp_schema().expect("derived schema is valid");

    println!("builder-built JSON-Schema:\n{}", serde_json::to_string_pretty(builder_schema.json_schema()).unwrap());
    println!("\nderive-built JSON-Schema matches: {}", builder_schema.json_schema() == derived_schema.json_schema());

    let accepted = json!({"query": "rust async runtimes", "limit": 20});
    match builder_schema.validate(&accepted) {
        Ok(params) => println!("\naccepted input -> {params:?}"),
        Err(errs) => println!("\nunexpectedly rejected: {errs:?}"),
    }

    let rejected = json!({"limit": 500, "sort": "alphabetical"});
    match builder_schema.validate(&rejected) {
        Ok(params) => println!("\nunexpectedly accepted: {params:?}"),
        Err(errs) => {
            println!("\nrejected input with {} error(s):", errs.len());
            for err in &errs {
                println!("  - {err}");
            }
        }
    }
}
