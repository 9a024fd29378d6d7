//! HTTP client for the agent endpoint

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct AgentRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct AgentReply {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Posts prompts to `{base_url}/api/agent`
#[derive(Clone)]
pub struct AgentClient {
    client: reqwest::Client,
    endpoint: String,
}

impl AgentClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/agent", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one agent turn and return the assistant text
    pub async fn ask(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&AgentRequest { prompt })
            .send()
            .await
            .with_context(|| format!("Failed to reach agent at {}", self.endpoint))?;

        let status = response.status();
        let reply: Option<AgentReply> = response.json().await.ok();

        if !status.is_success() {
            let detail = reply
                .and_then(|r| r.error)
                .unwrap_or_else(|| "no error detail".to_string());
            anyhow::bail!("Agent returned {}: {}", status, detail);
        }

        reply
            .and_then(|r| r.response)
            .context("Agent response did not contain a `response` field")
    }
}
