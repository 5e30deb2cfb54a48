//! # dynamo-mcp
//!
//! MCP (Model Context Protocol) server giving AI agents read-only access to
//! DynamoDB tables.
//!
//! It exposes:
//!
//! - **Tools**: list, describe, scan, query, paginated query, point lookup
//!   and count
//! - **Resources**: all table descriptions, and per-table schema summaries
//! - **Prompt**: a query-writing guide built from a table's live description
//! - **Multiple Transports**: stdio and HTTP
//!
//! ## Architecture
//!
//! ```text
//! AI Agent (Claude, GPT, etc.)
//!       │
//!       │ MCP protocol (tools / resources / prompts)
//!       ▼
//! ┌──────────────────────┐
//! │  Dynamo MCP Server   │
//! │  1. Check arguments  │  ← tool input schemas
//! │  2. Build request    │  ← builders
//! │  3. Execute / drain  │  ← dynamo-runtime
//! │  4. Normalize        │  ← envelope
//! │  5. Render text      │
//! └──────────┬───────────┘
//!            │ TableStore
//!            ▼
//!        DynamoDB
//! ```
//!
//! ## Tools
//!
//! | Tool | Store call | Result |
//! |------|------------|--------|
//! | `list-tables` | ListTables (all pages) | table names |
//! | `describe-table` | DescribeTable | full description |
//! | `scan-table` | Scan (one page, default limit 100) | rows |
//! | `query-table` | Query (one page) | rows |
//! | `paginate-query-table` | Query (every page) | rows |
//! | `get-item` | GetItem | row, or a not-found message |
//! | `count-items` | Scan with `Select=COUNT` | count |
//!
//! ## Example Usage
//!
//! ```ignore
//! use dynamo_adapter_aws::DynamoDbAdapter;
//! use dynamo_mcp::{McpServer, ToolExecutor};
//!
//! let store = DynamoDbAdapter::connect(&config.aws).await?;
//! let executor = ToolExecutor::new(Arc::new(store)).with_limits(config.limits.clone());
//!
//! McpServer::new(config.mcp.clone(), executor).run().await?;
//! ```

pub mod builders;
pub mod envelope;
pub mod error;
pub mod executor;
pub mod http_transport;
pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod tool_catalog;
pub mod tools;

// Re-export main types
pub use envelope::Envelope;
pub use error::{McpError, OperationError, ValidationError};
pub use executor::{ExecutionResult, ToolExecutor};
pub use protocol::{
    CallToolParams, CallToolResponse, JsonRpcRequest, JsonRpcResponse, ToolAnnotations,
    ToolContent, ToolDefinition,
};
pub use server::McpServer;
pub use tool_catalog::{Operation, catalog};
pub use tools::ToolRegistry;
