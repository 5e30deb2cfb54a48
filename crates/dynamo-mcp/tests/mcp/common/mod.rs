//! Shared test infrastructure for the MCP integration tests.
//!
//! This module provides:
//! - `ScriptedStore`: an in-memory `TableStore` with scripted query pages
//! - `RecordingSink`: a trace sink that keeps every event
//! - Fixtures (tables, rows) and JSON-RPC helpers

use async_trait::async_trait;
use dynamo_core::{
    AttributeDefinition, GetItemRequest, IndexDescription, Item, KeySchemaElement, LimitsConfig,
    McpConfig, QueryRequest, ScanRequest, Select, TableDescription,
};
use dynamo_mcp::protocol::JsonRpcResponse;
use dynamo_mcp::{JsonRpcRequest, McpServer, ToolExecutor};
use dynamo_runtime::{Page, StoreError, TableStore, TraceEvent, TraceSink};
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

pub const NOT_FOUND: &str = "Requested resource not found";

// =============================================================================
// SCRIPTED STORE
// =============================================================================

/// In-memory store. Tables answer scans and point lookups from their rows;
/// queries replay a scripted page sequence.
#[derive(Default)]
pub struct ScriptedStore {
    tables: Vec<TableDescription>,
    rows: HashMap<String, Vec<Item>>,
    broken_tables: HashSet<String>,
    list_error: Option<StoreError>,
    omit_count: bool,
    query_pages: Mutex<VecDeque<Result<Page, StoreError>>>,
    scans: Mutex<Vec<ScanRequest>>,
    queries: Mutex<Vec<QueryRequest>>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: TableDescription, rows: Vec<Item>) -> Self {
        self.rows.insert(table.table_name.clone(), rows);
        self.tables.push(table);
        self
    }

    /// Listed, but every describe fails.
    pub fn with_broken_table(mut self, name: &str) -> Self {
        self.broken_tables.insert(name.to_string());
        self.tables.push(TableDescription::named(name));
        self
    }

    pub fn with_list_error(mut self, error: StoreError) -> Self {
        self.list_error = Some(error);
        self
    }

    /// Count-mode scans report no count.
    pub fn without_count(mut self) -> Self {
        self.omit_count = true;
        self
    }

    pub fn with_query_pages(self, pages: Vec<Result<Page, StoreError>>) -> Self {
        *self.query_pages.lock().unwrap() = pages.into();
        self
    }

    pub fn scans(&self) -> Vec<ScanRequest> {
        self.scans.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<QueryRequest> {
        self.queries.lock().unwrap().clone()
    }

    fn rows_of(&self, table_name: &str) -> Result<&Vec<Item>, StoreError> {
        self.rows
            .get(table_name)
            .ok_or_else(|| StoreError::ResourceNotFound(NOT_FOUND.to_string()))
    }
}

#[async_trait]
impl TableStore for ScriptedStore {
    async fn list_tables(&self) -> Result<Vec<String>, StoreError> {
        if let Some(err) = &self.list_error {
            return Err(err.clone());
        }
        Ok(self.tables.iter().map(|t| t.table_name.clone()).collect())
    }

    async fn describe_table(&self, table_name: &str) -> Result<TableDescription, StoreError> {
        if self.broken_tables.contains(table_name) {
            return Err(StoreError::Service {
                code: Some("AccessDeniedException".to_string()),
                message: format!("Not authorized to describe {}", table_name),
            });
        }
        self.tables
            .iter()
            .find(|t| t.table_name == table_name)
            .cloned()
            .ok_or_else(|| StoreError::ResourceNotFound(NOT_FOUND.to_string()))
    }

    async fn scan(&self, request: &ScanRequest) -> Result<Page, StoreError> {
        self.scans.lock().unwrap().push(request.clone());
        let rows = self.rows_of(&request.table_name)?;

        if request.select == Select::Count {
            let count = i32::try_from(rows.len()).unwrap();
            return Ok(Page {
                items: Vec::new(),
                last_evaluated_key: None,
                count: (!self.omit_count).then_some(count),
            });
        }

        let limit = request.limit.map(|l| l as usize).unwrap_or(rows.len());
        let items: Vec<Item> = rows.iter().take(limit).cloned().collect();
        let count = i32::try_from(items.len()).unwrap();
        Ok(Page {
            items,
            last_evaluated_key: None,
            count: Some(count),
        })
    }

    async fn query(&self, request: &QueryRequest) -> Result<Page, StoreError> {
        self.queries.lock().unwrap().push(request.clone());
        self.rows_of(&request.table_name)?;
        self.query_pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Page::default()))
    }

    async fn get_item(&self, request: &GetItemRequest) -> Result<Option<Item>, StoreError> {
        let rows = self.rows_of(&request.table_name)?;
        Ok(rows
            .iter()
            .find(|row| request.key.iter().all(|(k, v)| row.get(k) == Some(v)))
            .cloned())
    }
}

// =============================================================================
// RECORDING SINK
// =============================================================================

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<TraceEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn stages(&self) -> Vec<String> {
        self.events()
            .iter()
            .map(|e| serde_json::to_value(e).unwrap()["stage"].as_str().unwrap().to_string())
            .collect()
    }
}

impl TraceSink for RecordingSink {
    fn record(&self, event: TraceEvent) {
        self.events.lock().unwrap().push(event);
    }
}

// =============================================================================
// TEST CONTEXT
// =============================================================================

pub struct TestContext {
    pub store: Arc<ScriptedStore>,
    pub sink: Arc<RecordingSink>,
    pub server: McpServer,
}

impl TestContext {
    pub fn new(store: ScriptedStore) -> Self {
        Self::with_limits(store, LimitsConfig::default())
    }

    pub fn with_limits(store: ScriptedStore, limits: LimitsConfig) -> Self {
        let store = Arc::new(store);
        let sink = Arc::new(RecordingSink::default());
        let executor = ToolExecutor::new(store.clone())
            .with_tracer(sink.clone())
            .with_limits(limits);

        Self {
            store,
            sink,
            server: McpServer::new(McpConfig::default(), executor),
        }
    }

    /// Send one JSON-RPC request.
    pub async fn rpc(&self, method: &str, params: Value) -> JsonRpcResponse {
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params: Some(params),
        };
        self.server.handle_request(request).await
    }

    /// Call a tool; returns `(is_error, text)`.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> (bool, String) {
        let response = self
            .rpc("tools/call", json!({ "name": name, "arguments": arguments }))
            .await;
        let result = response.result.expect("tools/call should not be a JSON-RPC error");
        let text = result["content"][0]["text"].as_str().unwrap().to_string();
        (result["isError"].as_bool().unwrap(), text)
    }

    /// Call a tool that must succeed and return JSON text.
    pub async fn call_tool_json(&self, name: &str, arguments: Value) -> Value {
        let (is_error, text) = self.call_tool(name, arguments).await;
        assert!(!is_error, "{} failed: {}", name, text);
        serde_json::from_str(&text).unwrap()
    }

    /// Read a resource body as JSON.
    pub async fn read_resource(&self, uri: &str) -> Value {
        let response = self.rpc("resources/read", json!({ "uri": uri })).await;
        let result = response.result.expect("resources/read failed");
        assert_eq!(result["contents"][0]["mimeType"], json!("application/json"));
        assert_eq!(result["contents"][0]["uri"], json!(uri));
        serde_json::from_str(result["contents"][0]["text"].as_str().unwrap()).unwrap()
    }
}

// =============================================================================
// FIXTURES
// =============================================================================

pub fn item(value: Value) -> Item {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture rows must be objects, got {}", other),
    }
}

pub fn users_table() -> TableDescription {
    let mut table = TableDescription::named("Users");
    table.table_status = Some("ACTIVE".to_string());
    table.key_schema = vec![KeySchemaElement::hash("id")];
    table.attribute_definitions = vec![AttributeDefinition::new("id", "S")];
    table.item_count = Some(3);
    table
}

pub fn users_rows() -> Vec<Item> {
    vec![
        item(json!({ "id": "u1", "name": "Ada", "age": 36 })),
        item(json!({ "id": "u2", "name": "Brian", "age": 29 })),
        item(json!({ "id": "u3", "name": "Chen", "age": 41 })),
    ]
}

/// Two global indexes and one local index.
pub fn orders_table() -> TableDescription {
    let mut table = TableDescription::named("Orders");
    table.table_status = Some("ACTIVE".to_string());
    table.key_schema = vec![KeySchemaElement::hash("PK"), KeySchemaElement::range("SK")];
    table.attribute_definitions = vec![
        AttributeDefinition::new("PK", "S"),
        AttributeDefinition::new("SK", "S"),
        AttributeDefinition::new("GSI1PK", "S"),
        AttributeDefinition::new("GSI2PK", "S"),
        AttributeDefinition::new("createdAt", "N"),
    ];
    table.global_secondary_indexes = vec![
        IndexDescription::new("GSI1", vec![KeySchemaElement::hash("GSI1PK")]),
        IndexDescription::new("GSI2", vec![KeySchemaElement::hash("GSI2PK")]),
    ];
    table.local_secondary_indexes = vec![IndexDescription::new(
        "ByCreatedAt",
        vec![KeySchemaElement::hash("PK"), KeySchemaElement::range("createdAt")],
    )];
    table
}

pub fn order_rows(prefix: &str, n: usize) -> Vec<Item> {
    (0..n)
        .map(|i| item(json!({ "PK": "user#1", "SK": format!("{}#{}", prefix, i) })))
        .collect()
}

pub fn cursor(sk: &str) -> Item {
    item(json!({ "PK": "user#1", "SK": sk }))
}

/// The standard two-table store.
pub fn standard_store() -> ScriptedStore {
    ScriptedStore::new()
        .with_table(users_table(), users_rows())
        .with_table(orders_table(), Vec::new())
}

pub fn query_args() -> Value {
    json!({
        "tableName": "Orders",
        "keyConditionExpression": "PK = :pk",
        "expressionAttributeValues": { ":pk": "user#1" }
    })
}
