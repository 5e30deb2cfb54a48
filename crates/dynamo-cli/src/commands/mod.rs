//! CLI command implementations for the DynamoDB MCP server.

pub mod check;
pub mod serve;
pub mod tools;
