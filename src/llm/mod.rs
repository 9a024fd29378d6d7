//! LLM provider implementations

mod error;
mod ollama;
mod types;

pub use error::LlmError;
pub use ollama::{OllamaProvider, DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL};
pub use types::*;

use anyhow::Result;
use async_trait::async_trait;

/// Trait for LLM providers
///
/// The orchestrator only depends on this trait, so tests can substitute a
/// scripted provider for the real model service.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Get the model identifier sent with each request
    fn model(&self) -> &str;

    /// Send a chat completion request (non-streaming)
    ///
    /// `None` (or an empty slice) means no tools are offered, which forces a
    /// natural-language answer.
    async fn chat(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
    ) -> Result<LlmResponse>;
}
