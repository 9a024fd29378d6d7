//! Wire types for the `/.well-known/mcp` tool endpoints.

use serde::{Deserialize, Serialize};

/// Tool advertised by `GET /.well-known/mcp/tools`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolInfo {
    /// The name of the tool to be used by the model
    pub name: String,
    /// What the tool does
    #[serde(default)]
    pub description: String,
}

/// Body of `POST /.well-known/mcp/tool/use`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolUseRequest {
    pub tool_name: String,
}

/// Successful tool output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolUseResponse {
    pub content: String,
}

/// Error body returned by the tool server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDetail {
    pub detail: String,
}
