//! # dynamo-core
//!
//! Shared types for the read-only DynamoDB MCP server:
//!
//! - [`config`]: startup configuration (AWS settings, MCP transport, query limits)
//! - [`request`]: immutable request descriptors handed to the store
//! - [`table`]: table descriptions and the condensed schema summary

pub mod config;
pub mod request;
pub mod table;

pub use config::{AwsConfig, ConfigError, LimitsConfig, McpConfig, ServerConfig, Transport};
pub use request::{GetItemRequest, Item, QueryRequest, ScanRequest, Select};
pub use table::{
    AttributeDefinition, IndexDescription, IndexSummary, KeySchemaElement, TableDescription,
    TableSchemaSummary,
};
