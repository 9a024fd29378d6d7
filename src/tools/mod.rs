//! Tools the agent can offer to the model
//!
//! The agent declares a fixed capability set at startup. Execution happens
//! remotely, through a [`ToolClient`].

mod client;

pub use client::{McpToolClient, ToolClient, ToolClientError, FAILED_FACT_MESSAGE};

use crate::llm::ToolDefinition;
use serde_json::json;

/// Name of the single tool this agent knows
pub const GET_RANDOM_FACT: &str = "get_random_fact";

/// Declaration of `get_random_fact` as the model sees it (no parameters)
pub fn random_fact_tool() -> ToolDefinition {
    ToolDefinition {
        name: GET_RANDOM_FACT.to_string(),
        description: "Fetches a random interesting fact from a service.".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {},
            "required": [],
        }),
    }
}

/// Immutable set of tool declarations offered to the model
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    definitions: Vec<ToolDefinition>,
}

impl ToolRegistry {
    pub fn new(definitions: Vec<ToolDefinition>) -> Self {
        Self { definitions }
    }

    /// Registry with the built-in `get_random_fact` tool
    pub fn with_defaults() -> Self {
        Self::new(vec![random_fact_tool()])
    }

    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.iter().any(|d| d.name == name)
    }
}
