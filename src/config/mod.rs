//! Configuration management for fact-agent

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub server: ServerConfig,
    pub tools: ToolsConfig,
    pub tool_server: ToolServerConfig,
    pub agent: AgentConfig,
    pub chat: ChatConfig,
}

/// Language-model service (Ollama)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: crate::llm::DEFAULT_OLLAMA_URL.to_string(),
            model: crate::llm::DEFAULT_OLLAMA_MODEL.to_string(),
        }
    }
}

/// Orchestration endpoint bind address
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Where the agent reaches the tool service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolsConfig {
    pub url: String,
    pub discovery_url: String,
    pub timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8001/.well-known/mcp/tool/use".to_string(),
            discovery_url: "http://localhost:8001/.well-known/mcp/tools".to_string(),
            timeout_secs: 10,
        }
    }
}

/// The bundled fact tool server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolServerConfig {
    pub host: String,
    pub port: u16,
    pub facts_url: String,
}

impl Default for ToolServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
            facts_url: "https://uselessfacts.jsph.pl/api/v2/facts/random".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentConfig {
    /// Upper bound for a single model call
    pub request_timeout_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 120,
        }
    }
}

/// Terminal chat client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChatConfig {
    pub agent_url: String,
    /// Must exceed a tool-assisted turn on the server: two model calls plus one tool call
    pub request_timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            agent_url: "http://127.0.0.1:3000".to_string(),
            request_timeout_secs: 300,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a file, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "fact-agent") {
            let config_dir = proj_dirs.config_dir();
            std::fs::create_dir_all(config_dir)?;
            Ok(config_dir.join("config.toml"))
        } else {
            Ok(PathBuf::from("config.toml"))
        }
    }

    /// Directory for the chat client's log file
    pub fn data_dir() -> Result<PathBuf> {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "fact-agent") {
            let data_dir = proj_dirs.data_dir();
            std::fs::create_dir_all(data_dir)?;
            Ok(data_dir.to_path_buf())
        } else {
            Ok(PathBuf::from("."))
        }
    }

    /// Apply `OLLAMA_BASE_URL`, `OLLAMA_MODEL` and `FACT_AGENT_TOOL_URL`
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("OLLAMA_BASE_URL").filter(|v| !v.is_empty()) {
            self.llm.base_url = url;
        }
        if let Some(model) = lookup("OLLAMA_MODEL").filter(|v| !v.is_empty()) {
            self.llm.model = model;
        }
        if let Some(url) = lookup("FACT_AGENT_TOOL_URL").filter(|v| !v.is_empty()) {
            self.tools.url = url;
        }
    }
}
