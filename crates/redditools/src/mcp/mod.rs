mod cli;
mod sse;
mod stdio;
mod tools;

pub use cli::App;

use crate::prelude::*;
use serde::{Deserialize, Serialize};

// JSON-RPC 2.0 types
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    /// `None` when the member is absent; an explicit `null` is `Some(Null)`
    #[serde(default, deserialize_with = "present")]
    id: Option<serde_json::Value>,
    method: String,
    params: Option<serde_json::Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcError {
    pub fn parse_error(message: impl std::fmt::Display) -> Self {
        Self {
            code: -32700,
            message: format!("Parse error: {message}"),
        }
    }

    pub fn invalid_request(message: impl std::fmt::Display) -> Self {
        Self {
            code: -32600,
            message: format!("Invalid Request: {message}"),
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: -32602,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: -32603,
            message: message.into(),
        }
    }
}

impl JsonRpcResponse {
    fn reply(id: Option<serde_json::Value>, result: Result<serde_json::Value, JsonRpcError>) -> Self {
        match result {
            Ok(value) => Self {
                jsonrpc: "2.0".to_string(),
                id,
                result: Some(value),
                error: None,
            },
            Err(error) => Self {
                jsonrpc: "2.0".to_string(),
                id,
                result: None,
                error: Some(error),
            },
        }
    }

    /// Reply to input that could not be read as JSON at all
    pub fn parse_error(message: impl std::fmt::Display) -> Self {
        Self::reply(None, Err(JsonRpcError::parse_error(message)))
    }
}

// MCP Protocol types
#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        cli::Commands::Stdio => stdio::run_stdio(global).await,
        cli::Commands::Sse(options) => sse::run_sse(options, global).await,
    }
}

/// Handle one JSON-RPC message
///
/// Returns `None` for notifications (messages without an `id` member), which
/// never get a response. A request whose `id` is `null` is still answered.
pub async fn handle_request(request_str: &str, global: &crate::Global) -> Option<JsonRpcResponse> {
    let message: serde_json::Value = match serde_json::from_str(request_str) {
        Ok(message) => message,
        Err(e) => return Some(JsonRpcResponse::parse_error(e)),
    };

    let echoed_id = message.get("id").cloned();
    let request: JsonRpcRequest = match serde_json::from_value(message) {
        Ok(req) => req,
        Err(e) => {
            return Some(JsonRpcResponse::reply(
                echoed_id,
                Err(JsonRpcError::invalid_request(e)),
            ));
        }
    };

    let Some(id) = request.id else {
        log::debug!("notification: {}", request.method);
        return None;
    };

    if request.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::reply(
            Some(id),
            Err(JsonRpcError::invalid_request(format!(
                "unsupported jsonrpc version {}",
                request.jsonrpc
            ))),
        ));
    }

    log::debug!("request {id}: {}", request.method);

    let result = match request.method.as_str() {
        "initialize" => tools::handle_initialize(),
        "ping" => Ok(serde_json::json!({})),
        "tools/list" => tools::handle_tools_list(&global.config),
        "tools/call" => tools::handle_tools_call(request.params, global).await,
        method => Err(JsonRpcError {
            code: -32601,
            message: format!("Method not found: {method}"),
        }),
    };

    Some(JsonRpcResponse::reply(Some(id), result))
}
