//! MCP resources.
//!
//! - `dynamodb://tables-info`: every table's description
//! - `dynamodb://table-schema/{tableName}`: one table's schema summary
//!
//! Resource bodies never fail: store errors are written into the body.

use crate::error::McpError;
use crate::executor::ToolExecutor;
use crate::protocol::{ResourceContents, ResourceDefinition, ResourceTemplate};
use futures::future::join_all;
use serde_json::{Value, json};
use url::Url;

pub const TABLES_INFO_URI: &str = "dynamodb://tables-info";
pub const TABLE_SCHEMA_TEMPLATE: &str = "dynamodb://table-schema/{tableName}";

const JSON_MIME_TYPE: &str = "application/json";
const TABLE_INFO_UNAVAILABLE: &str = "Could not get table information.";
const TABLE_NAME_MISSING: &str = "Table name was not provided.";

/// A parsed resource URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceUri {
    TablesInfo,
    /// The final path segment, if any.
    TableSchema(Option<String>),
}

impl ResourceUri {
    pub fn parse(uri: &str) -> Result<Self, McpError> {
        let not_found = || McpError::ResourceNotFound {
            uri: uri.to_string(),
        };

        let url = Url::parse(uri).map_err(|_| not_found())?;
        if url.scheme() != "dynamodb" {
            return Err(not_found());
        }

        match url.host_str() {
            Some("tables-info") => Ok(ResourceUri::TablesInfo),
            Some("table-schema") => {
                let table = url
                    .path_segments()
                    .and_then(|segments| segments.last())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string);
                Ok(ResourceUri::TableSchema(table))
            }
            _ => Err(not_found()),
        }
    }
}

pub fn resource_list() -> Vec<ResourceDefinition> {
    vec![ResourceDefinition {
        uri: TABLES_INFO_URI.to_string(),
        name: "dynamodb-tables-info".to_string(),
        description: Some("DynamoDB table information".to_string()),
        mime_type: JSON_MIME_TYPE.to_string(),
    }]
}

pub fn resource_templates() -> Vec<ResourceTemplate> {
    vec![ResourceTemplate {
        uri_template: TABLE_SCHEMA_TEMPLATE.to_string(),
        name: "dynamodb-table-schema".to_string(),
        description: Some("DynamoDB table schema information".to_string()),
        mime_type: JSON_MIME_TYPE.to_string(),
    }]
}

/// Read one resource.
pub async fn read_resource(executor: &ToolExecutor, uri: &str) -> Result<ResourceContents, McpError> {
    let body = match ResourceUri::parse(uri)? {
        ResourceUri::TablesInfo => tables_info(executor).await,
        ResourceUri::TableSchema(None) => json!({ "error": TABLE_NAME_MISSING }),
        ResourceUri::TableSchema(Some(table)) => {
            serde_json::to_value(executor.table_schema(&table).await)?
        }
    };

    Ok(ResourceContents {
        uri: uri.to_string(),
        mime_type: JSON_MIME_TYPE.to_string(),
        text: serde_json::to_string_pretty(&body)?,
    })
}

/// List tables, then describe them all concurrently.
async fn tables_info(executor: &ToolExecutor) -> Value {
    let names = match executor.table_names().await {
        Ok(names) => names,
        Err(err) => return json!({ "error": err.to_string() }),
    };

    let described = join_all(names.iter().map(|name| async move {
        let unavailable = || json!({ "TableName": name, "Error": TABLE_INFO_UNAVAILABLE });
        match executor.describe(name).await {
            Ok(table) => serde_json::to_value(table).unwrap_or_else(|_| unavailable()),
            Err(err) => {
                tracing::debug!(table = %name, error = %err, "Could not describe table");
                unavailable()
            }
        }
    }))
    .await;

    Value::Array(described)
}
