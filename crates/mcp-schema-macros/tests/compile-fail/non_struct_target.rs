use mcp_schema_macros::McpSchema;

#[derive(McpSchema)]
enum Params {
    A,
    B,
}

fn main() {}
