//! Minimal MCP-style tool service
//!
//! Provides the wire types shared by the agent's tool client and the bundled
//! fact server, plus the server itself.

pub mod facts;
pub mod server;
pub mod types;

pub use facts::FactSource;
pub use types::{ErrorDetail, ToolInfo, ToolUseRequest, ToolUseResponse};
