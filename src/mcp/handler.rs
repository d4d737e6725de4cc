// mastodon-mcp - Mastodon tools for AI agents over the Model Context Protocol
// Copyright (C) 2025 mastodon-mcp Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! MCP request handler

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::error::ToolError;
use crate::log_rpc;
use crate::models::{error_codes, methods, RpcError, RpcRequest, RpcResponse, JSONRPC_VERSION};
use crate::tools::MastodonTools;

/// MCP protocol revision this server speaks
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Name reported in `serverInfo`
pub const SERVER_NAME: &str = "mastodon-mcp";

/// Parameters of `tools/call`
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Routes decoded JSON-RPC messages to the tool catalog
pub struct McpHandler {
    tools: MastodonTools,
}

impl McpHandler {
    pub fn new(tools: MastodonTools) -> Self {
        Self { tools }
    }

    /// Handle one raw input line. Returns `None` when no response is due.
    pub async fn handle_line(&self, line: &str) -> Option<RpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to parse message: {}", e);
                return Some(parse_error(e));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: RpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                warn!("Invalid request: {}", e);
                return Some(RpcResponse::err(
                    id,
                    RpcError::new(error_codes::INVALID_REQUEST, format!("Invalid request: {}", e)),
                ));
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(RpcResponse::err(
                id,
                RpcError::new(
                    error_codes::INVALID_REQUEST,
                    format!("Unsupported jsonrpc version: {}", request.jsonrpc),
                ),
            ));
        }

        self.handle_request(request).await
    }

    /// Handle a well-formed request or notification
    pub async fn handle_request(&self, request: RpcRequest) -> Option<RpcResponse> {
        if request.is_notification() {
            log_rpc!(notification, request.method.as_str());
            self.handle_notification(&request);
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);

        log_rpc!(request, request.method.as_str(), id);

        let result = match request.method.as_str() {
            methods::INITIALIZE => Ok(self.handle_initialize(request.params.as_ref())),
            methods::PING => Ok(json!({})),
            methods::TOOLS_LIST => Ok(self.handle_tools_list()),
            methods::TOOLS_CALL => self.handle_tools_call(request.params).await,
            method => {
                warn!("Unknown method: {}", method);
                Err(RpcError::new(
                    error_codes::METHOD_NOT_FOUND,
                    format!("Method not found: {}", method),
                ))
            }
        };

        let response = match result {
            Ok(result) => RpcResponse::ok(id, result),
            Err(error) => RpcResponse::err(id, error),
        };

        log_rpc!(response, request.method.as_str(), response.id, response.is_success());
        Some(response)
    }

    fn handle_notification(&self, request: &RpcRequest) {
        match request.method.as_str() {
            methods::INITIALIZED => info!("Client initialized"),
            methods::CANCELLED => debug!("Client cancelled a request; in-flight calls run to completion"),
            other => debug!("Ignoring notification: {}", other),
        }
    }

    fn handle_initialize(&self, params: Option<&Value>) -> Value {
        if let Some(client) = params.and_then(|p| p.get("clientInfo")) {
            info!("Initializing session for client {}", client);
        }

        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    fn handle_tools_list(&self) -> Value {
        json!({ "tools": self.tools.definitions() })
    }

    async fn handle_tools_call(&self, params: Option<Value>) -> Result<Value, RpcError> {
        let params: ToolCallParams = params
            .ok_or_else(|| RpcError::new(error_codes::INVALID_PARAMS, "Missing params"))
            .and_then(|p| {
                serde_json::from_value(p).map_err(|e| {
                    RpcError::new(error_codes::INVALID_PARAMS, format!("Invalid params: {}", e))
                })
            })?;

        match self.tools.call(&params.name, params.arguments).await {
            Ok(text) => Ok(tool_result(text, false)),
            Err(e) if e.is_client_error() => Err(protocol_error(&e)),
            Err(e) => Ok(tool_result(e.to_string(), true)),
        }
    }
}

/// Response to input that is not a JSON document; the id is unknowable
pub fn parse_error(cause: impl std::fmt::Display) -> RpcResponse {
    RpcResponse::err(
        Value::Null,
        RpcError::new(error_codes::PARSE_ERROR, format!("Parse error: {}", cause)),
    )
}

/// Wrap tool output in an MCP `CallToolResult`
fn tool_result(text: String, is_error: bool) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error
    })
}

fn protocol_error(error: &ToolError) -> RpcError {
    RpcError::new(error_codes::INVALID_PARAMS, error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MastodonClient;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn handler(base_url: &str) -> McpHandler {
        let client = MastodonClient::new(base_url, "token").unwrap();
        McpHandler::new(MastodonTools::new(client))
    }

    fn offline() -> McpHandler {
        handler("http://127.0.0.1:9")
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = offline()
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"test","version":"0"}}}"#)
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let response = offline()
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let handler = offline();

        let parse = handler.handle_line("{not json").await.unwrap();
        assert_eq!(parse.id, Value::Null);
        assert_eq!(parse.error.unwrap().code, error_codes::PARSE_ERROR);

        let version = handler
            .handle_line(r#"{"jsonrpc":"1.0","id":2,"method":"ping"}"#)
            .await
            .unwrap();
        assert_eq!(version.id, json!(2));
        assert_eq!(version.error.unwrap().code, error_codes::INVALID_REQUEST);

        let unknown = handler
            .handle_line(r#"{"jsonrpc":"2.0","id":"a","method":"resources/list"}"#)
            .await
            .unwrap();
        assert_eq!(unknown.error.unwrap().code, error_codes::METHOD_NOT_FOUND);

        let missing = handler
            .handle_line(r#"{"jsonrpc":"2.0","id":4,"method":"tools/call"}"#)
            .await
            .unwrap();
        assert_eq!(missing.error.unwrap().code, error_codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_tools_list() {
        let response = offline()
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#)
            .await
            .unwrap();

        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), 4);
        for tool in tools {
            assert!(tool["name"].as_str().unwrap().starts_with("mastodon_"));
            assert_eq!(tool["inputSchema"]["type"], "object");
        }
    }

    #[tokio::test]
    async fn test_invalid_arguments_are_protocol_errors() {
        let server = MockServer::start().await;

        let response = handler(&server.uri())
            .handle_line(r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"mastodon_get_timeline","arguments":{"limit":99}}}"#)
            .await
            .unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.code, error_codes::INVALID_PARAMS);
        assert!(error.message.starts_with("Invalid arguments:"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_api_failure_is_tool_error_result() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/trends/tags"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let response = handler(&server.uri())
            .handle_line(r#"{"jsonrpc":"2.0","id":6,"method":"tools/call","params":{"name":"mastodon_get_trending_tags"}}"#)
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(
            result["content"][0]["text"],
            "Request failed with status 503: maintenance"
        );
    }
}
