//! Client for the remote tool service
//!
//! `invoke` is the only failure-containment boundary in the agent: anything
//! that goes wrong talking to the tool service degrades to a fixed text
//! result instead of failing the turn.

use crate::mcp::{ToolInfo, ToolUseRequest, ToolUseResponse};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Tool result used whenever the tool service cannot produce one
pub const FAILED_FACT_MESSAGE: &str = "Failed to get fact: Could not connect to the tool server.";

#[derive(Debug, Error)]
pub enum ToolClientError {
    #[error("Tool server request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Tool server returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Tool server response could not be decoded: {0}")]
    Decode(String),
}

/// Something that can execute a named tool and return its text output
#[async_trait]
pub trait ToolClient: Send + Sync {
    /// Execute `tool_name`; never fails, a broken tool yields diagnostic text
    async fn invoke(&self, tool_name: &str) -> String;
}

/// HTTP client for the `/.well-known/mcp` tool endpoints
#[derive(Clone)]
pub struct McpToolClient {
    client: reqwest::Client,
    use_url: String,
    discovery_url: String,
}

impl McpToolClient {
    pub fn new(use_url: &str, discovery_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            use_url: use_url.to_string(),
            discovery_url: discovery_url.to_string(),
        })
    }

    pub fn from_config(config: &crate::Config) -> anyhow::Result<Self> {
        Self::new(
            &config.tools.url,
            &config.tools.discovery_url,
            Duration::from_secs(config.tools.timeout_secs),
        )
    }

    /// Execute a tool, surfacing the typed failure
    pub async fn try_invoke(&self, tool_name: &str) -> Result<String, ToolClientError> {
        let response = self
            .client
            .post(&self.use_url)
            .json(&ToolUseRequest {
                tool_name: tool_name.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ToolClientError::Status { status, body });
        }

        let body: ToolUseResponse = response
            .json()
            .await
            .map_err(|e| ToolClientError::Decode(e.to_string()))?;
        Ok(body.content)
    }

    /// List the tools the server advertises
    pub async fn list_tools(&self) -> Result<Vec<ToolInfo>, ToolClientError> {
        let response = self.client.get(&self.discovery_url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ToolClientError::Status { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| ToolClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ToolClient for McpToolClient {
    async fn invoke(&self, tool_name: &str) -> String {
        tracing::info!("Calling tool server: {}", tool_name);
        match self.try_invoke(tool_name).await {
            Ok(content) => {
                tracing::debug!("Tool server returned: {}", content);
                content
            }
            Err(e) => {
                tracing::error!("Error calling tool server: {}", e);
                FAILED_FACT_MESSAGE.to_string()
            }
        }
    }
}
