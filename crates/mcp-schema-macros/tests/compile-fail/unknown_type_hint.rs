use mcp_schema_macros::McpSchema;

#[derive(McpSchema)]
struct Params {
    #[schema(values = ["low", "high"], type = "weird")]
    priority: String,
}

fn main() {}
