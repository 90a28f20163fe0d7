//! MCP (Model Context Protocol) handler
//!
//! Implements a JSON-RPC style MCP server for AI model integration.
//! Uses sealed traits to control which tools can be registered.

use crate::catalog::CatalogTool;
use crate::client::{JokeClient, Ready};
use crate::error::{Error, Result};
use crate::jokes::{JokeParamTool, JokeTool};
use async_trait::async_trait;
use domain_products::{ProductRepository, ProductService};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// JSON-RPC 2.0 error codes
pub mod codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    /// Tool ran but failed (upstream HTTP error, serialization, ...)
    pub const TOOL_ERROR: i32 = -32000;
}

const PROTOCOL_VERSION: &str = "2024-11-05";

// ============================================================================
// Sealed Trait Pattern - Prevents external implementations
// ============================================================================

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Trait for MCP tools - sealed to prevent external implementations
#[async_trait]
pub trait Tool: sealed::Sealed + Send + Sync {
    /// Tool name
    fn name(&self) -> &'static str;

    /// Tool description for the AI model
    fn description(&self) -> &'static str;

    /// JSON schema for input parameters
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool with given parameters
    ///
    /// A string result is sent as-is; anything else is sent as pretty JSON.
    async fn execute(&self, params: serde_json::Value) -> Result<serde_json::Value>;
}

// ============================================================================
// MCP Protocol Types
// ============================================================================

/// MCP request structure
///
/// `id` is `None` only when the member is absent; `"id": null` is kept as
/// `Some(Value::Null)` and still gets a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpRequest {
    pub jsonrpc: String,
    #[serde(
        default,
        deserialize_with = "present_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

fn present_id<'de, D>(deserializer: D) -> std::result::Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl McpRequest {
    /// Requests without an id member are notifications and get no response
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// MCP response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

/// MCP error structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl McpResponse {
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<serde_json::Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(McpError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

// ============================================================================
// MCP Handler
// ============================================================================

/// MCP request handler
pub struct McpHandler {
    tools: BTreeMap<&'static str, Box<dyn Tool>>,
    server_info: ServerInfo,
}

#[derive(Clone, Serialize)]
struct ServerInfo {
    name: String,
    version: String,
}

impl McpHandler {
    /// Create a handler exposing the joke tools
    pub fn new(client: JokeClient<Ready>) -> Self {
        let client = Arc::new(client);
        let mut handler = Self {
            tools: BTreeMap::new(),
            server_info: ServerInfo {
                name: "joke-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        handler.register(JokeTool::new(Arc::clone(&client)));
        handler.register(JokeParamTool::new(client));
        handler
    }

    /// Also expose the product catalog tools, backed by `service`
    pub fn with_catalog<R>(mut self, service: ProductService<R>) -> Self
    where
        R: ProductRepository + 'static,
    {
        let service = Arc::new(service);
        for tool in CatalogTool::all(service) {
            self.register(tool);
        }
        self
    }

    fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(tool.name(), Box::new(tool));
    }

    /// Names of the registered tools, sorted
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.keys().copied().collect()
    }

    /// Handle an MCP request
    ///
    /// Returns `None` for notifications.
    pub async fn handle(&self, request: McpRequest) -> Option<McpResponse> {
        if request.is_notification() {
            debug!(method = %request.method, "Notification received");
            return None;
        }

        if request.jsonrpc != "2.0" {
            return Some(McpResponse::error(
                request.id,
                codes::INVALID_REQUEST,
                "Invalid request: jsonrpc must be \"2.0\"",
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "ping" => McpResponse::success(request.id, serde_json::json!({})),
            "tools/list" => self.handle_list_tools(request.id),
            "tools/call" => self.handle_call_tool(request.id, request.params).await,
            _ => McpResponse::error(request.id, codes::METHOD_NOT_FOUND, "Method not found"),
        };
        Some(response)
    }

    /// Handle initialize request
    fn handle_initialize(&self, id: Option<serde_json::Value>) -> McpResponse {
        McpResponse::success(
            id,
            serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "serverInfo": self.server_info,
                "capabilities": {
                    "tools": {}
                }
            }),
        )
    }

    /// Handle tools/list request
    fn handle_list_tools(&self, id: Option<serde_json::Value>) -> McpResponse {
        let tools: Vec<serde_json::Value> = self
            .tools
            .values()
            .map(|tool| {
                serde_json::json!({
                    "name": tool.name(),
                    "description": tool.description(),
                    "inputSchema": tool.input_schema()
                })
            })
            .collect();

        McpResponse::success(id, serde_json::json!({ "tools": tools }))
    }

    /// Handle tools/call request
    async fn handle_call_tool(
        &self,
        id: Option<serde_json::Value>,
        params: serde_json::Value,
    ) -> McpResponse {
        let tool_name = match params.get("name").and_then(|v| v.as_str()) {
            Some(name) => name,
            None => return McpResponse::error(id, codes::INVALID_PARAMS, "Missing tool name"),
        };

        let tool = match self.tools.get(tool_name) {
            Some(tool) => tool,
            None => {
                let err = Error::UnknownTool {
                    name: tool_name.to_string(),
                };
                return McpResponse::error(id, err.code(), err.to_string());
            }
        };

        let arguments = match params.get("arguments") {
            None | Some(serde_json::Value::Null) => serde_json::json!({}),
            Some(args) if args.is_object() => args.clone(),
            Some(_) => {
                return McpResponse::error(
                    id,
                    codes::INVALID_PARAMS,
                    "Tool arguments must be an object",
                );
            }
        };

        match tool.execute(arguments).await {
            Ok(result) => {
                let is_error = result.get("status").and_then(|s| s.as_str()) == Some("error");
                let text = match result {
                    serde_json::Value::String(text) => text,
                    other => serde_json::to_string_pretty(&other).unwrap_or_default(),
                };
                McpResponse::success(
                    id,
                    serde_json::json!({
                        "content": [{
                            "type": "text",
                            "text": text
                        }],
                        "isError": is_error
                    }),
                )
            }
            Err(e) => {
                warn!(tool = tool_name, error = %e, "Tool call failed");
                McpResponse::error(id, e.code(), e.to_string())
            }
        }
    }

    /// Parse and handle a JSON request string
    ///
    /// Invalid JSON is a parse error; valid JSON that is not a request object
    /// is an invalid request. Returns `None` when the message was a notification.
    pub async fn handle_json(&self, json: &str) -> Option<String> {
        let value: serde_json::Value = match serde_json::from_str(json) {
            Ok(value) => value,
            Err(e) => {
                let response = McpResponse::error(
                    Some(serde_json::Value::Null),
                    codes::PARSE_ERROR,
                    format!("Parse error: {}", e),
                );
                return Some(serde_json::to_string(&response).unwrap_or_default());
            }
        };

        let id = value.get("id").cloned().unwrap_or(serde_json::Value::Null);
        let request: McpRequest = match serde_json::from_value(value) {
            Ok(req) => req,
            Err(e) => {
                let response = McpResponse::error(
                    Some(id),
                    codes::INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                );
                return Some(serde_json::to_string(&response).unwrap_or_default());
            }
        };

        let response = self.handle(request).await?;
        Some(serde_json::to_string(&response).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::JokeClientConfig;
    use domain_products::{InMemoryProductRepository, ValidationRules};
    use serde_json::json;

    fn handler() -> McpHandler {
        // never contacted by these tests
        let client = JokeClient::new(JokeClientConfig::new("http://127.0.0.1:9"))
            .init()
            .unwrap();
        McpHandler::new(client)
    }

    fn request(method: &str, params: serde_json::Value) -> McpRequest {
        McpRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params,
        }
    }

    #[test]
    fn test_mcp_response_success() {
        let response = McpResponse::success(Some(json!(1)), json!({"ok": true}));
        assert!(response.error.is_none());
        assert!(response.result.is_some());
    }

    #[test]
    fn test_mcp_response_error() {
        let response = McpResponse::error(Some(json!(1)), codes::INVALID_REQUEST, "Invalid request");
        assert!(response.error.is_some());
        assert!(response.result.is_none());
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = handler()
            .handle(request("initialize", json!({})))
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "joke-mcp");
    }

    #[tokio::test]
    async fn test_list_tools() {
        let response = handler()
            .handle(request("tools/list", json!({})))
            .await
            .unwrap();
        let tools = response.result.unwrap()["tools"].clone();
        let names: Vec<&str> = tools
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["joke", "joke_param"]);
        assert_eq!(
            tools[1]["inputSchema"]["properties"]["category"]["default"],
            "sport"
        );
    }

    #[tokio::test]
    async fn test_catalog_tools_are_registered() {
        let service = ProductService::new(InMemoryProductRepository::new(), ValidationRules::IN_MEMORY);
        let handler = handler().with_catalog(service);
        assert_eq!(handler.tool_names().len(), 9);
        assert!(handler.tool_names().contains(&"search_products"));
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = handler()
            .handle(request("resources/list", json!({})))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_call_errors() {
        let handler = handler();

        let response = handler
            .handle(request("tools/call", json!({})))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, codes::INVALID_PARAMS);

        let response = handler
            .handle(request("tools/call", json!({"name": "weather"})))
            .await
            .unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, codes::INVALID_PARAMS);
        assert_eq!(error.message, "Unknown tool: weather");

        let response = handler
            .handle(request("tools/call", json!({"name": "joke", "arguments": [1]})))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let handler = handler();
        let reply = handler
            .handle_json(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn test_parse_error() {
        let reply = handler().handle_json("{not json").await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["error"]["code"], codes::PARSE_ERROR);
        assert_eq!(value["id"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_null_id_is_answered() {
        let reply = handler()
            .handle_json(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#)
            .await
            .expect("a null id is not a notification");
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["result"], json!({}));
        assert!(value.as_object().unwrap().contains_key("id"));
        assert_eq!(value["id"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_valid_json_that_is_not_a_request() {
        let handler = handler();

        let reply = handler
            .handle_json(r#"{"jsonrpc":"2.0","id":3}"#)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["error"]["code"], codes::INVALID_REQUEST);
        assert_eq!(value["id"], 3);

        let reply = handler.handle_json("[1, 2]").await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["error"]["code"], codes::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_wrong_jsonrpc_version() {
        let reply = handler()
            .handle_json(r#"{"jsonrpc":"1.0","id":7,"method":"ping"}"#)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["error"]["code"], codes::INVALID_REQUEST);
        assert_eq!(value["id"], 7);
    }
}
