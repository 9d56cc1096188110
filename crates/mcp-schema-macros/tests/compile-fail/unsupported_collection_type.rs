use mcp_schema_macros::McpSchema;

#[derive(McpSchema)]
struct Params {
    #[schema(required)]
    tags: Vec<String>,
}

fn main() {}
