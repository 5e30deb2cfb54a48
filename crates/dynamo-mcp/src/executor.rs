//! Tool execution engine.
//!
//! This module runs the read-only tools against the store:
//! - Building request descriptors from the call arguments
//! - Single-call execution or the paginated drain
//! - Normalizing every outcome into an [`Envelope`]
//! - Rendering the envelope as an MCP tool result

use crate::builders::{self, parse_args};
use crate::envelope::Envelope;
use crate::error::{OperationError, ValidationError};
use crate::protocol::{CallToolResponse, ToolContent};
use crate::tool_catalog::Operation;
use dynamo_core::{Item, LimitsConfig, TableDescription, TableSchemaSummary};
use dynamo_runtime::{
    DrainOptions, StoreError, TableStore, TraceEvent, TraceSink, TracingSink, drain_query,
    with_deadline,
};
use serde::Serialize;
use serde_json::{Value, json};
use std::future::Future;
use std::sync::Arc;

/// Text returned by `get-item` when no row has the key.
pub const ITEM_NOT_FOUND: &str = "Could not find the corresponding item.";

/// Result of a tool execution.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,
    /// The result content.
    pub content: Vec<ToolContent>,
    /// Error message if failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    /// Create a successful result with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            success: true,
            content: vec![ToolContent::text(text)],
            error: None,
        }
    }

    /// Create an error result.
    pub fn error(message: impl Into<String>) -> Self {
        let msg = message.into();
        Self {
            success: false,
            content: vec![ToolContent::text(format!("Error occurred: {}", msg))],
            error: Some(msg),
        }
    }

    /// Render an envelope for `operation`. `table_name` is only used by
    /// `count-items`.
    pub fn from_envelope(operation: Operation, table_name: &str, envelope: Envelope) -> Self {
        match envelope {
            Envelope::Failure { message } => Self::error(message),
            Envelope::Success { data } => match operation {
                Operation::GetItem if data.is_null() => Self::text(ITEM_NOT_FOUND),
                Operation::Count => {
                    Self::text(format!("Table \"{}\" has {} items.", table_name, data))
                }
                _ => Self::text(
                    serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string()),
                ),
            },
        }
    }

    /// First text block.
    pub fn text_content(&self) -> &str {
        self.content.first().map(ToolContent::as_text).unwrap_or("")
    }

    pub fn into_response(self) -> CallToolResponse {
        CallToolResponse {
            content: self.content,
            is_error: !self.success,
        }
    }
}

/// Runs tools against one shared store.
pub struct ToolExecutor {
    store: Arc<dyn TableStore>,
    tracer: Arc<dyn TraceSink>,
    limits: LimitsConfig,
}

impl ToolExecutor {
    /// Create an executor with default limits, tracing through `tracing`.
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self {
            store,
            tracer: Arc::new(TracingSink),
            limits: LimitsConfig::default(),
        }
    }

    pub fn with_tracer(mut self, tracer: Arc<dyn TraceSink>) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn with_limits(mut self, limits: LimitsConfig) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    /// Execute a tool call and render the outcome.
    pub async fn execute(&self, operation: Operation, arguments: Value) -> ExecutionResult {
        let table_name = table_name_of(&arguments);
        let envelope = self.run(operation, arguments).await;
        ExecutionResult::from_envelope(operation, &table_name, envelope)
    }

    /// Render arguments that were rejected before execution.
    pub fn reject(
        &self,
        operation: Operation,
        arguments: &Value,
        error: ValidationError,
    ) -> ExecutionResult {
        let error = OperationError::from(error);
        self.record_fault(operation, &error);
        ExecutionResult::from_envelope(
            operation,
            &table_name_of(arguments),
            Envelope::from_result::<Value>(Err(error)),
        )
    }

    /// Execute a tool call, returning the normalized envelope.
    pub async fn run(&self, operation: Operation, arguments: Value) -> Envelope {
        let result = match operation {
            Operation::ListTables => self.list_tables().await,
            Operation::DescribeTable => self.describe_table(arguments).await,
            Operation::Scan => self.scan(arguments).await,
            Operation::Query => self.query(arguments).await,
            Operation::PaginatedQuery => self.paginated_query(arguments).await,
            Operation::GetItem => self.get_item(arguments).await,
            Operation::Count => self.count(arguments).await,
        };

        if let Err(err) = &result {
            self.record_fault(operation, err);
        }
        Envelope::from_result(result)
    }

    /// Names of every table, under the request deadline.
    pub async fn table_names(&self) -> Result<Vec<String>, StoreError> {
        self.call(self.store.list_tables()).await
    }

    /// One table's description, under the request deadline.
    pub async fn describe(&self, table_name: &str) -> Result<TableDescription, StoreError> {
        self.call(self.store.describe_table(table_name)).await
    }

    /// Condensed schema of a table, or `None` when it cannot be described
    /// for any reason.
    pub async fn table_schema(&self, table_name: &str) -> Option<TableSchemaSummary> {
        match self.describe(table_name).await {
            Ok(table) => Some(table.summarize()),
            Err(err) => {
                tracing::debug!(table = table_name, error = %err, "Table schema unavailable");
                None
            }
        }
    }

    async fn list_tables(&self) -> Result<Value, OperationError> {
        let operation = Operation::ListTables;
        self.trace_built(operation, &json!({}));

        let tables = self.table_names().await?;
        self.trace_received(operation, tables.len());
        Ok(json!(tables))
    }

    async fn describe_table(&self, arguments: Value) -> Result<Value, OperationError> {
        let operation = Operation::DescribeTable;
        let table_name = builders::describe_table(parse_args(arguments)?)?;
        self.trace_built(operation, &json!({ "TableName": table_name }));

        let table = self.describe(&table_name).await?;
        self.trace_received(operation, 1);
        to_data(&table)
    }

    async fn scan(&self, arguments: Value) -> Result<Value, OperationError> {
        let operation = Operation::Scan;
        let request = builders::scan(parse_args(arguments)?, self.limits.default_scan_limit)?;
        self.trace_built(operation, &request);

        let page = self.call(self.store.scan(&request)).await?;
        self.trace_received(operation, page.items.len());
        Ok(rows(page.items))
    }

    async fn query(&self, arguments: Value) -> Result<Value, OperationError> {
        let operation = Operation::Query;
        let request = builders::query(parse_args(arguments)?)?;
        self.trace_built(operation, &request);

        let page = self.call(self.store.query(&request)).await?;
        self.trace_received(operation, page.items.len());
        Ok(rows(page.items))
    }

    async fn paginated_query(&self, arguments: Value) -> Result<Value, OperationError> {
        let operation = Operation::PaginatedQuery;
        let request = builders::paginated_query(parse_args(arguments)?)?;
        self.trace_built(operation, &request);

        let options = DrainOptions {
            max_pages: self.limits.max_pages,
            page_timeout: self.limits.request_timeout(),
        };
        let items = drain_query(
            operation.tool_name(),
            self.store.as_ref(),
            &request,
            options,
            self.tracer.as_ref(),
        )
        .await?;

        self.trace_received(operation, items.len());
        Ok(rows(items))
    }

    async fn get_item(&self, arguments: Value) -> Result<Value, OperationError> {
        let operation = Operation::GetItem;
        let request = builders::get_item(parse_args(arguments)?)?;
        self.trace_built(operation, &request);

        let item = self.call(self.store.get_item(&request)).await?;
        self.trace_received(operation, usize::from(item.is_some()));
        Ok(item.map(Value::Object).unwrap_or(Value::Null))
    }

    async fn count(&self, arguments: Value) -> Result<Value, OperationError> {
        let operation = Operation::Count;
        let request = builders::count(parse_args(arguments)?)?;
        self.trace_built(operation, &request);

        let page = self.call(self.store.scan(&request)).await?;
        let count = page.count.unwrap_or(0);
        self.trace_received(operation, usize::try_from(count).unwrap_or(0));
        Ok(json!(count))
    }

    async fn call<T, Fut>(&self, fut: Fut) -> Result<T, StoreError>
    where
        Fut: Future<Output = Result<T, StoreError>>,
    {
        with_deadline(self.limits.request_timeout(), fut).await
    }

    fn trace_built<R: Serialize>(&self, operation: Operation, request: &R) {
        self.tracer.record(TraceEvent::RequestBuilt {
            operation: operation.tool_name(),
            request: serde_json::to_value(request).unwrap_or(Value::Null),
        });
    }

    fn trace_received(&self, operation: Operation, items: usize) {
        self.tracer.record(TraceEvent::ResponseReceived {
            operation: operation.tool_name(),
            items,
        });
    }

    fn record_fault(&self, operation: Operation, error: &OperationError) {
        self.tracer.record(TraceEvent::FaultRaised {
            operation: operation.tool_name(),
            message: error.to_string(),
        });
    }
}

fn rows(items: Vec<Item>) -> Value {
    Value::Array(items.into_iter().map(Value::Object).collect())
}

fn to_data<T: Serialize>(value: &T) -> Result<Value, OperationError> {
    serde_json::to_value(value)
        .map_err(|e| OperationError::from(StoreError::Conversion(e.to_string())))
}

fn table_name_of(arguments: &Value) -> String {
    arguments
        .get("tableName")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
