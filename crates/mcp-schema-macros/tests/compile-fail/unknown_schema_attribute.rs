use mcp_schema_macros::McpSchema;

#[derive(McpSchema)]
struct Params {
    #[schema(bogus)]
    name: String,
}

fn main() {}
