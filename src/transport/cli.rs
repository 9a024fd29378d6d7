//! CLI transport for direct terminal interaction

use crate::config::Config;
use crate::tools::McpToolClient;
use crate::tui::{self, AgentClient};
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::time::Duration;

fn agent_client(config: &Config, url: Option<String>) -> Result<AgentClient> {
    let base_url = url.unwrap_or_else(|| config.chat.agent_url.clone());
    AgentClient::new(
        &base_url,
        Duration::from_secs(config.chat.request_timeout_secs),
    )
}

/// Run the interactive terminal chat
pub async fn run_chat(config: &Config, url: Option<String>) -> Result<()> {
    let client = agent_client(config, url)?;
    tui::run_chat(client).await
}

/// Send one prompt and print the answer to stdout
pub async fn run_ask(config: &Config, prompt: &str, url: Option<String>) -> Result<()> {
    let client = agent_client(config, url)?;
    tracing::debug!("Asking {}", client.endpoint());

    let response = client.ask(prompt).await?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", response)?;
    Ok(())
}

/// Print the tools advertised by the configured tool server
pub async fn run_tools(config: &Config) -> Result<()> {
    let client = McpToolClient::from_config(config)?;
    let tools = client
        .list_tools()
        .await
        .with_context(|| format!("Failed to list tools from {}", config.tools.discovery_url))?;

    let mut stdout = io::stdout().lock();
    if tools.is_empty() {
        writeln!(stdout, "No tools advertised by {}", config.tools.discovery_url)?;
        return Ok(());
    }

    let width = tools.iter().map(|t| t.name.len()).max().unwrap_or(0);
    for tool in &tools {
        writeln!(stdout, "{:<width$}  {}", tool.name, tool.description, width = width)?;
    }
    Ok(())
}
