//! The fixed catalog of read-only tools.

use crate::protocol::{ToolAnnotations, ToolDefinition};
use serde_json::{Map, Value, json};

/// A read-only store operation exposed as a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListTables,
    DescribeTable,
    Scan,
    Query,
    PaginatedQuery,
    GetItem,
    Count,
}

impl Operation {
    /// Catalog order.
    pub const ALL: [Operation; 7] = [
        Operation::ListTables,
        Operation::DescribeTable,
        Operation::Scan,
        Operation::Query,
        Operation::PaginatedQuery,
        Operation::GetItem,
        Operation::Count,
    ];

    /// Name on the wire.
    pub fn tool_name(self) -> &'static str {
        match self {
            Operation::ListTables => "list-tables",
            Operation::DescribeTable => "describe-table",
            Operation::Scan => "scan-table",
            Operation::Query => "query-table",
            Operation::PaginatedQuery => "paginate-query-table",
            Operation::GetItem => "get-item",
            Operation::Count => "count-items",
        }
    }

    pub fn from_tool_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.tool_name() == name)
    }

    pub fn definition(self) -> ToolDefinition {
        let (title, description, input_schema) = match self {
            Operation::ListTables => (
                "List tables",
                "Get a list of all DynamoDB tables",
                object_schema(Map::new(), &[]),
            ),
            Operation::DescribeTable => (
                "Describe table",
                "Get detailed information about a DynamoDB table",
                object_schema(
                    properties([(
                        "tableName",
                        string_prop("Name of the table to get details for"),
                    )]),
                    &["tableName"],
                ),
            ),
            Operation::Scan => (
                "Scan table",
                "Scan items from a DynamoDB table",
                object_schema(
                    properties([
                        ("tableName", string_prop("Name of the table to scan")),
                        (
                            "limit",
                            number_prop("Maximum number of items to return (default: 100)"),
                        ),
                        (
                            "filterExpression",
                            string_prop("Filter expression (e.g: 'age > :minAge')"),
                        ),
                        (
                            "expressionAttributeValues",
                            object_prop("Filter expression attribute values (JSON format)"),
                        ),
                        (
                            "projectionExpression",
                            string_prop("Projection expression (e.g: \"id\")"),
                        ),
                    ]),
                    &["tableName"],
                ),
            ),
            Operation::Query => (
                "Query table",
                "Query items from a DynamoDB table based on conditions",
                object_schema(
                    properties([
                        ("tableName", string_prop("Name of the table to query")),
                        (
                            "keyConditionExpression",
                            string_prop("Key condition expression (e.g: 'PK = :pk')"),
                        ),
                        (
                            "expressionAttributeValues",
                            object_prop("Filter expression attribute values (JSON format)"),
                        ),
                        ("indexName", string_prop("Name of the index to use (optional)")),
                        ("filterExpression", string_prop("Filter expression (optional)")),
                        ("limit", number_prop("Maximum number of items to return")),
                        (
                            "projectionExpression",
                            string_prop("Projection expression (optional)"),
                        ),
                    ]),
                    &["tableName", "keyConditionExpression", "expressionAttributeValues"],
                ),
            ),
            Operation::PaginatedQuery => (
                "Query all pages",
                "Paginate query results, following every page until the last one",
                object_schema(
                    properties([
                        ("tableName", string_prop("Table name")),
                        (
                            "keyConditionExpression",
                            string_prop("Key condition expression (e.g: 'PK = :pk')"),
                        ),
                        (
                            "expressionAttributeValues",
                            object_prop("Filter expression attribute values (JSON format)"),
                        ),
                        (
                            "projectionExpression",
                            string_prop("Projection expression (optional)"),
                        ),
                    ]),
                    &["tableName", "keyConditionExpression", "expressionAttributeValues"],
                ),
            ),
            Operation::GetItem => (
                "Get item",
                "Get an item from a DynamoDB table based on a specific key",
                object_schema(
                    properties([
                        ("tableName", string_prop("Table name")),
                        ("key", object_prop("Item key (JSON format)")),
                    ]),
                    &["tableName", "key"],
                ),
            ),
            Operation::Count => (
                "Count items",
                "Count items in a DynamoDB table",
                object_schema(
                    properties([
                        ("tableName", string_prop("Table name")),
                        ("filterExpression", string_prop("Filter expression (optional)")),
                        (
                            "expressionAttributeValues",
                            object_prop("Filter expression attribute values (optional)"),
                        ),
                    ]),
                    &["tableName"],
                ),
            ),
        };

        ToolDefinition {
            name: self.tool_name().to_string(),
            description: Some(description.to_string()),
            input_schema,
            annotations: Some(ToolAnnotations::read_only(title)),
        }
    }
}

/// Definitions of every tool, in catalog order.
pub fn catalog() -> Vec<ToolDefinition> {
    Operation::ALL.into_iter().map(Operation::definition).collect()
}

fn object_schema(properties: Map<String, Value>, required: &[&str]) -> Value {
    let mut schema = json!({
        "type": "object",
        "properties": properties,
    });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}

fn properties<const N: usize>(entries: [(&str, Value); N]) -> Map<String, Value> {
    entries
        .into_iter()
        .map(|(name, schema)| (name.to_string(), schema))
        .collect()
}

fn string_prop(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn number_prop(description: &str) -> Value {
    json!({ "type": "number", "description": description })
}

fn object_prop(description: &str) -> Value {
    json!({
        "type": "object",
        "additionalProperties": true,
        "description": description
    })
}
