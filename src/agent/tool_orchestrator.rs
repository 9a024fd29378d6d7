//! Single-turn tool orchestration
//!
//! One turn is a bounded two-step protocol:
//! 1. Ask the model, offering the registered tools
//! 2. If it asked for a known tool, run it remotely, append the result and
//!    ask the model again without tools to force a natural-language answer
//!
//! Nothing survives the turn. Model failures propagate; tool failures have
//! already been turned into text by the [`ToolClient`].

use crate::llm::{LlmProvider, Message, ToolCall};
use crate::tools::{ToolClient, ToolRegistry};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Tool calls honored per turn; further directives in the same response are ignored
pub const MAX_TOOL_CALLS_PER_TURN: usize = 1;

/// Which branch of the turn produced the answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnPath {
    /// The model answered without asking for a tool
    Direct,
    /// A tool ran and the model produced a final answer from its result
    ToolAssisted { tool: String },
    /// The model asked for a tool nobody registered; its first answer is used as-is
    UnknownTool { tool: String },
}

/// Result of one orchestrated turn
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub text: String,
    pub path: TurnPath,
    /// Full conversation of the turn, in model order
    pub messages: Vec<Message>,
}

/// Coordinates the model and the tool service for one user prompt
pub struct ToolOrchestrator {
    llm: Arc<dyn LlmProvider>,
    tool_client: Arc<dyn ToolClient>,
    tools: ToolRegistry,
}

impl ToolOrchestrator {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        tool_client: Arc<dyn ToolClient>,
        tools: ToolRegistry,
    ) -> Self {
        Self {
            llm,
            tool_client,
            tools,
        }
    }

    /// Model identifier used for this orchestrator's calls
    pub fn model(&self) -> &str {
        self.llm.model()
    }

    /// Run one turn for `prompt`
    pub async fn run_turn(&self, prompt: &str) -> Result<TurnOutcome> {
        let mut messages = vec![Message::user(prompt)];

        tracing::info!(
            "Asking LLM ({}/{}) what to do...",
            self.llm.name(),
            self.llm.model()
        );
        let decision = self
            .llm
            .chat(&messages, Some(self.tools.definitions()))
            .await
            .context("Model decision call failed")?;
        messages.push(decision.to_message());

        let requested = decision.tool_calls();
        if requested.len() > MAX_TOOL_CALLS_PER_TURN {
            tracing::warn!(
                "LLM requested {} tools, honoring the first {}",
                requested.len(),
                MAX_TOOL_CALLS_PER_TURN
            );
        }
        let honored: Vec<&ToolCall> = requested.iter().take(MAX_TOOL_CALLS_PER_TURN).collect();

        if honored.is_empty() {
            tracing::info!("LLM answered without using a tool");
            return Ok(TurnOutcome {
                text: decision.text().to_string(),
                path: TurnPath::Direct,
                messages,
            });
        }

        if let Some(unknown) = honored.iter().find(|c| !self.tools.contains(&c.name)) {
            tracing::warn!(
                "LLM requested unknown tool '{}', answering directly",
                unknown.name
            );
            return Ok(TurnOutcome {
                text: decision.text().to_string(),
                path: TurnPath::UnknownTool {
                    tool: unknown.name.clone(),
                },
                messages,
            });
        }

        let mut tool_name = String::new();
        for call in honored {
            tracing::info!("LLM decided to use tool: {}", call.name);
            let result = self.tool_client.invoke(&call.name).await;
            messages.push(Message::tool_result(result));
            tool_name = call.name.clone();
        }

        tracing::info!("Sending tool result back to LLM for final response...");
        let final_response = self
            .llm
            .chat(&messages, None)
            .await
            .context("Model finalization call failed")?;
        messages.push(final_response.to_message());

        Ok(TurnOutcome {
            text: final_response.text().to_string(),
            path: TurnPath::ToolAssisted { tool: tool_name },
            messages,
        })
    }
}
