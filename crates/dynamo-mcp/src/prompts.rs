//! The `dynamodb-query-help` prompt.
//!
//! Builds a query-writing guide from a table's live description. If the
//! table cannot be described the guide falls back to general advice listing
//! every tool.

use crate::error::McpError;
use crate::executor::ToolExecutor;
use crate::protocol::{
    GetPromptParams, GetPromptResult, PromptArgument, PromptDefinition, PromptMessage, ToolContent,
};
use crate::tool_catalog::Operation;
use dynamo_core::{KeySchemaElement, TableDescription};

pub const QUERY_HELP_PROMPT: &str = "dynamodb-query-help";

/// Depth of the query guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    Basic,
    Advanced,
}

impl QueryType {
    /// `basic` or absent selects the basic guide; anything else is advanced.
    pub fn from_argument(value: Option<&str>) -> Self {
        match value {
            None | Some("basic") => QueryType::Basic,
            Some(_) => QueryType::Advanced,
        }
    }
}

pub fn prompt_list() -> Vec<PromptDefinition> {
    vec![PromptDefinition {
        name: QUERY_HELP_PROMPT.to_string(),
        description: Some("Prompt to help you write a DynamoDB query".to_string()),
        arguments: vec![
            PromptArgument {
                name: "tableName".to_string(),
                description: Some("Name of the table to query".to_string()),
                required: true,
            },
            PromptArgument {
                name: "queryType".to_string(),
                description: Some("Query complexity level (\"basic\" or \"advanced\")".to_string()),
                required: false,
            },
        ],
    }]
}

/// Render a prompt by name.
pub async fn get_prompt(
    executor: &ToolExecutor,
    params: &GetPromptParams,
) -> Result<GetPromptResult, McpError> {
    if params.name != QUERY_HELP_PROMPT {
        return Err(McpError::PromptNotFound {
            name: params.name.clone(),
        });
    }

    let table_name = params
        .arguments
        .get("tableName")
        .filter(|t| !t.is_empty())
        .ok_or_else(|| McpError::InvalidRequest("tableName argument is required".to_string()))?;
    let query_type = QueryType::from_argument(params.arguments.get("queryType").map(String::as_str));

    let text = query_help(executor, table_name, query_type).await;

    Ok(GetPromptResult {
        description: Some(format!("DynamoDB query help for table {}", table_name)),
        messages: vec![PromptMessage {
            role: "user".to_string(),
            content: ToolContent::text(text),
        }],
    })
}

pub async fn query_help(executor: &ToolExecutor, table_name: &str, query_type: QueryType) -> String {
    match executor.describe(table_name).await {
        Ok(table) => match query_type {
            QueryType::Basic => basic_guide(table_name, &table),
            QueryType::Advanced => advanced_guide(table_name, &table),
        },
        Err(err) => fallback_guide(table_name, &err.to_string()),
    }
}

pub fn basic_guide(table_name: &str, table: &TableDescription) -> String {
    format!(
        r#"
# Basic query guide for table {table_name}

## Table structure
{key_schema}

## Query example
```json
{{
  "TableName": "{table_name}",
  "KeyConditionExpression": "{partition_key} = :partitionValue",
  "ExpressionAttributeValues": {{
    ":partitionValue": "desired value"
  }}
}}
```

## Basic operations
1. Scan: Use '{scan}' tool to scan the entire table.
2. Single item retrieval: Use '{get_item}' tool.
3. Table information retrieval: Use '{describe}' tool.
4. Item count calculation: Use '{count}' tool.
"#,
        key_schema = pretty(&table.key_schema),
        partition_key = partition_key(&table.key_schema),
        scan = Operation::Scan.tool_name(),
        get_item = Operation::GetItem.tool_name(),
        describe = Operation::DescribeTable.tool_name(),
        count = Operation::Count.tool_name(),
    )
}

pub fn advanced_guide(table_name: &str, table: &TableDescription) -> String {
    let indexes = if table.global_secondary_indexes.is_empty() {
        "This table has no GSI.".to_string()
    } else {
        let names: Vec<String> = table
            .global_secondary_indexes
            .iter()
            .map(|index| format!("- {}", index.index_name))
            .collect();
        format!("This table has the following GSIs:\n{}", names.join("\n"))
    };

    format!(
        r#"
# Advanced query guide for table {table_name}

## Table structure
{description}

## Advanced query example
```json
{{
  "TableName": "{table_name}",
  "KeyConditionExpression": "{partition_key} = :partitionValue AND {sort_key} BETWEEN :low AND :high",
  "FilterExpression": "attributeName = :attrValue",
  "ExpressionAttributeValues": {{
    ":partitionValue": "desired value",
    ":low": "minimum value",
    ":high": "maximum value",
    ":attrValue": "filter value"
  }}
}}
```

## Advanced expressions
1. begins_with: "begins_with(attributeName, :prefix)"
2. contains: "contains(attributeName, :substring)"
3. Comparison operators: =, <>, <, <=, >, >=
4. Logical operators: AND, OR, NOT

## Query using indexes
{indexes}
"#,
        description = pretty(table),
        partition_key = partition_key(&table.key_schema),
        sort_key = sort_key(&table.key_schema),
    )
}

pub fn fallback_guide(table_name: &str, error: &str) -> String {
    let tools: Vec<String> = Operation::ALL
        .iter()
        .enumerate()
        .map(|(i, op)| format!("{}. Use '{}' tool to {}", i + 1, op.tool_name(), purpose(*op)))
        .collect();

    format!(
        r#"
# DynamoDB query help

An error occurred while getting detailed information about table "{table_name}": {error}

## General DynamoDB operations
{tools}

First, check table information and try again.
"#,
        tools = tools.join("\n"),
    )
}

fn purpose(operation: Operation) -> &'static str {
    match operation {
        Operation::ListTables => "get table list",
        Operation::DescribeTable => "view table details",
        Operation::Scan => "scan",
        Operation::Query => "query",
        Operation::PaginatedQuery => "paginate query",
        Operation::GetItem => "retrieve an item",
        Operation::Count => "count items",
    }
}

fn partition_key(key_schema: &[KeySchemaElement]) -> &str {
    key_name(key_schema, "HASH").unwrap_or("partitionKeyName")
}

fn sort_key(key_schema: &[KeySchemaElement]) -> &str {
    key_name(key_schema, "RANGE").unwrap_or("sortKeyName")
}

fn key_name<'a>(key_schema: &'a [KeySchemaElement], key_type: &str) -> Option<&'a str> {
    key_schema
        .iter()
        .find(|k| k.key_type == key_type)
        .map(|k| k.attribute_name.as_str())
}

fn pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}
