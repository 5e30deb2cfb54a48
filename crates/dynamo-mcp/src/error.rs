//! Error types for the MCP crate.

use dynamo_runtime::StoreError;
use thiserror::Error;

/// Errors of the server loop itself.
#[derive(Debug, Error)]
pub enum McpError {
    /// Failed to start the server.
    #[error("failed to start MCP server: {0}")]
    StartupFailed(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Tool not found.
    #[error("Tool not found: {name}")]
    ToolNotFound { name: String },

    /// Resource URI not served here.
    #[error("Resource not found: {uri}")]
    ResourceNotFound { uri: String },

    /// Prompt not found.
    #[error("Prompt not found: {name}")]
    PromptNotFound { name: String },

    /// Transport error.
    #[error("transport error: {0}")]
    TransportError(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Malformed or missing tool arguments. Raised before any store call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// Arguments did not match the tool's input schema.
    #[error("Invalid arguments for tool {tool}: {}", .errors.join("; "))]
    Schema { tool: String, errors: Vec<String> },

    /// Arguments could not be read into the tool's argument type.
    #[error("Invalid arguments: {0}")]
    Malformed(String),
}

/// Anything that can fail a tool operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
