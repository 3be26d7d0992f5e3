mod reddit;

use redditools_core::config::RedditConfig;
use redditools_core::reddit::{CommentSort, SearchSort};
use serde::{Deserialize, Serialize};

use crate::error::ToolError;

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "redditools".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
}

/// Tool descriptors; defaults and bounds come from the running configuration
pub fn tools(config: &RedditConfig) -> Vec<Tool> {
    let search = &config.search;
    let comments = &config.comments;

    vec![
        Tool {
            name: "reddit_search".to_string(),
            description: "Search Reddit for posts matching a query. Returns the title, author, score, and post ID of each hit.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query terms"
                    },
                    "subreddit": {
                        "type": "string",
                        "description": "Optional subreddit to search within (without the 'r/' prefix)"
                    },
                    "sort": {
                        "type": "string",
                        "description": "Sort method for results",
                        "enum": SearchSort::ALL.iter().map(SearchSort::as_str).collect::<Vec<_>>(),
                        "default": search.sort.as_str()
                    },
                    "limit": {
                        "type": "number",
                        "description": format!(
                            "Maximum number of results to return ({}-{})",
                            search.limit_bounds.start(),
                            search.limit_bounds.end()
                        ),
                        "minimum": search.limit_bounds.start(),
                        "maximum": search.limit_bounds.end(),
                        "default": search.limit
                    }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: "reddit_post".to_string(),
            description: "Get details for a specific Reddit post: title, author, score, upvote ratio, comment count, creation time, body, and external link.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "post_id": {
                        "type": "string",
                        "description": "Reddit post ID (with or without the 't3_' prefix) or post URL"
                    }
                },
                "required": ["post_id"]
            }),
        },
        Tool {
            name: "reddit_comments".to_string(),
            description: "Get the top-level comments for a specific Reddit post.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "post_id": {
                        "type": "string",
                        "description": "Reddit post ID (with or without the 't3_' prefix) or post URL"
                    },
                    "sort": {
                        "type": "string",
                        "description": "Sort method for comments",
                        "enum": CommentSort::ALL.iter().map(CommentSort::as_str).collect::<Vec<_>>(),
                        "default": comments.sort.as_str()
                    },
                    "limit": {
                        "type": "number",
                        "description": format!(
                            "Maximum number of comments to return ({}-{})",
                            comments.limit_bounds.start(),
                            comments.limit_bounds.end()
                        ),
                        "minimum": comments.limit_bounds.start(),
                        "maximum": comments.limit_bounds.end(),
                        "default": comments.limit
                    }
                },
                "required": ["post_id"]
            }),
        },
    ]
}

pub fn handle_tools_list(config: &RedditConfig) -> Result<serde_json::Value, JsonRpcError> {
    let result = ToolsList {
        tools: tools(config),
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {e}")))?;

    let arguments = tool_arguments(params.arguments)?;

    match params.name.as_str() {
        "reddit_search" => reddit::handle_reddit_search(arguments, global).await,
        "reddit_post" => reddit::handle_reddit_post(arguments, global).await,
        "reddit_comments" => reddit::handle_reddit_comments(arguments, global).await,
        _ => Err(JsonRpcError::invalid_params(format!(
            "Unknown tool: {}",
            params.name
        ))),
    }
}

/// Tool arguments must be a JSON object when present
fn tool_arguments(
    arguments: Option<serde_json::Value>,
) -> Result<Option<serde_json::Map<String, serde_json::Value>>, JsonRpcError> {
    match arguments {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(JsonRpcError::invalid_params(format!(
            "Invalid arguments: expected an object, got {other}"
        ))),
    }
}

/// Wrap a tool outcome in the MCP result envelope
///
/// Tool failures are results with `isError` set, not JSON-RPC errors, so the
/// client gets to read the message.
fn tool_result(
    tool: &str,
    outcome: Result<String, ToolError>,
) -> Result<serde_json::Value, JsonRpcError> {
    let result = match outcome {
        Ok(text) => CallToolResult {
            content: vec![Content::Text { text }],
            is_error: None,
        },
        Err(err) => {
            log::warn!("{tool} failed: {err}");
            CallToolResult {
                content: vec![Content::Text {
                    text: err.to_string(),
                }],
                is_error: Some(true),
            }
        }
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
}
