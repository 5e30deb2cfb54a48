//! MCP server implementation.
//!
//! Dispatches JSON-RPC requests to the tool executor, the resources and the
//! prompt, over stdio or HTTP.

use crate::error::McpError;
use crate::executor::{ExecutionResult, ToolExecutor};
use crate::http_transport::HttpServer;
use crate::prompts;
use crate::protocol::*;
use crate::resources;
use crate::tool_catalog::Operation;
use crate::tools::ToolRegistry;
use dynamo_core::{McpConfig, Transport};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

pub const SERVER_NAME: &str = "dynamo-readonly-mcp";
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// The MCP server. Cheap to clone; clones share the registry and executor.
#[derive(Clone)]
pub struct McpServer {
    config: McpConfig,
    tools: Arc<ToolRegistry>,
    executor: Arc<ToolExecutor>,
}

impl McpServer {
    /// Create a server exposing the full tool catalog.
    pub fn new(config: McpConfig, executor: ToolExecutor) -> Self {
        let tools = ToolRegistry::with_catalog();
        tracing::info!(tool_count = tools.len(), "Registered read-only tools");

        Self {
            config,
            tools: Arc::new(tools),
            executor: Arc::new(executor),
        }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Start the MCP server.
    pub async fn run(&self) -> Result<(), McpError> {
        match self.config.transport {
            Transport::Stdio => self.run_stdio().await,
            Transport::Http => self.run_http().await,
        }
    }

    /// Run the server with stdio transport.
    async fn run_stdio(&self) -> Result<(), McpError> {
        tracing::info!("Starting MCP server with stdio transport");
        self.serve_stream(tokio::io::stdin(), tokio::io::stdout())
            .await
    }

    /// Serve newline-delimited JSON-RPC from `input`, writing responses to
    /// `output` until `input` reaches EOF.
    ///
    /// Each line is handled in its own task; responses are written by a
    /// single writer task in completion order. A line that is not UTF-8 is
    /// answered with a parse error and the loop continues.
    pub async fn serve_stream<R, W>(&self, input: R, output: W) -> Result<(), McpError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (response_tx, mut response_rx) = mpsc::channel::<JsonRpcResponse>(100);

        let writer = tokio::spawn(async move {
            let mut output = output;
            while let Some(response) = response_rx.recv().await {
                let mut line = serde_json::to_vec(&response)?;
                line.push(b'\n');
                output.write_all(&line).await?;
                output.flush().await?;
            }
            Ok::<(), McpError>(())
        });

        let mut reader = BufReader::new(input);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let line = match String::from_utf8(std::mem::take(&mut buf)) {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(error = %e, "Message is not valid UTF-8");
                    let response =
                        JsonRpcResponse::error(None, PARSE_ERROR, format!("Parse error: {}", e));
                    if response_tx.send(response).await.is_err() {
                        tracing::warn!("Response dropped: output writer has stopped");
                    }
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let server = self.clone();
            let response_tx = response_tx.clone();
            tokio::spawn(async move {
                if let Some(response) = server.handle_message(&line).await
                    && response_tx.send(response).await.is_err()
                {
                    tracing::warn!("Response dropped: output writer has stopped");
                }
            });
        }

        tracing::info!("Input closed; waiting for in-flight requests");
        drop(response_tx);
        writer
            .await
            .map_err(|e| McpError::TransportError(e.to_string()))??;

        Ok(())
    }

    /// Run the server with HTTP transport.
    pub async fn run_http(&self) -> Result<(), McpError> {
        let address = self.config.bind_address();
        tracing::info!(address = %address, "Starting MCP server with HTTP transport");

        let (request_tx, mut request_rx) =
            mpsc::channel::<(JsonRpcRequest, mpsc::Sender<Option<JsonRpcResponse>>)>(100);

        let server = self.clone();
        tokio::spawn(async move {
            while let Some((request, response_tx)) = request_rx.recv().await {
                let server = server.clone();
                tokio::spawn(async move {
                    let response = server.handle(request).await;
                    let _ = response_tx.send(response).await;
                });
            }
        });

        HttpServer::new(address, request_tx).run().await
    }

    /// Handle one raw line: parse it, then dispatch. Returns `None` for
    /// notifications.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed JSON-RPC message");
                return Some(JsonRpcResponse::error(
                    None,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        let id = value.get("id").cloned().filter(|id| !id.is_null());
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                id,
                INVALID_REQUEST,
                format!("Invalid request: {}", e),
            )),
        }
    }

    /// Handle a parsed request. Notifications are accepted and never answered.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification received");
            return None;
        }
        Some(self.handle_request(request).await)
    }

    /// Handle a JSON-RPC request.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_list_tools(id),
            "tools/call" => self.handle_call_tool(id, request.params).await,
            "resources/list" => {
                JsonRpcResponse::success(id, json!({ "resources": resources::resource_list() }))
            }
            "resources/templates/list" => JsonRpcResponse::success(
                id,
                json!({ "resourceTemplates": resources::resource_templates() }),
            ),
            "resources/read" => self.handle_read_resource(id, request.params).await,
            "prompts/list" => {
                JsonRpcResponse::success(id, json!({ "prompts": prompts::prompt_list() }))
            }
            "prompts/get" => self.handle_get_prompt(id, request.params).await,
            "shutdown" => self.handle_shutdown(id),
            _ => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        }
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            },
            "capabilities": {
                "tools": { "listChanged": false },
                "resources": { "subscribe": false, "listChanged": false },
                "prompts": { "listChanged": false }
            }
        });
        JsonRpcResponse::success(id, result)
    }

    fn handle_list_tools(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = json!({ "tools": self.tools.list() });
        JsonRpcResponse::success(id, result)
    }

    async fn handle_call_tool(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match parse_params(params) {
            Ok(p) => p,
            Err(message) => return JsonRpcResponse::error(id, INVALID_PARAMS, message),
        };

        let operation = match Operation::from_tool_name(&params.name) {
            Some(op) if self.tools.contains(&params.name) => op,
            _ => {
                let err = McpError::ToolNotFound { name: params.name };
                return JsonRpcResponse::error(id, INVALID_PARAMS, err.to_string());
            }
        };

        let arguments = match params.arguments {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };

        tracing::debug!(tool = %params.name, "Tool called");

        let result = match self.tools.validate_arguments(&params.name, &arguments) {
            Ok(()) => self.executor.execute(operation, arguments).await,
            Err(err) => self.executor.reject(operation, &arguments, err),
        };

        self.execution_result_to_response(id, result)
    }

    fn execution_result_to_response(
        &self,
        id: Option<Value>,
        result: ExecutionResult,
    ) -> JsonRpcResponse {
        match serde_json::to_value(result.into_response()) {
            Ok(response) => JsonRpcResponse::success(id, response),
            Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
        }
    }

    async fn handle_read_resource(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ReadResourceParams = match parse_params(params) {
            Ok(p) => p,
            Err(message) => return JsonRpcResponse::error(id, INVALID_PARAMS, message),
        };

        match resources::read_resource(&self.executor, &params.uri).await {
            Ok(contents) => JsonRpcResponse::success(id, json!({ "contents": [contents] })),
            Err(err) => JsonRpcResponse::error(id, INVALID_PARAMS, err.to_string()),
        }
    }

    async fn handle_get_prompt(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: GetPromptParams = match parse_params(params) {
            Ok(p) => p,
            Err(message) => return JsonRpcResponse::error(id, INVALID_PARAMS, message),
        };

        match prompts::get_prompt(&self.executor, &params).await {
            Ok(result) => match serde_json::to_value(result) {
                Ok(value) => JsonRpcResponse::success(id, value),
                Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
            },
            Err(err) => JsonRpcResponse::error(id, INVALID_PARAMS, err.to_string()),
        }
    }

    fn handle_shutdown(&self, id: Option<Value>) -> JsonRpcResponse {
        tracing::info!("MCP server shutdown requested");
        JsonRpcResponse::success(id, json!(null))
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, String> {
    match params {
        Some(p) => serde_json::from_value(p).map_err(|e| format!("Invalid params: {}", e)),
        None => Err("Missing params".to_string()),
    }
}
