//! mcp-fact-agent: a tool-augmented chat agent
//!
//! This library provides:
//! - An orchestration endpoint (`POST /api/agent`) that lets a local model
//!   decide whether to call a tool before answering
//! - A tool server advertising `get_random_fact` over MCP-style HTTP routes
//! - A terminal chat client for the orchestration endpoint

pub mod agent;
pub mod config;
pub mod llm;
pub mod mcp;
pub mod tools;
pub mod transport;
pub mod tui;

pub use config::Config;
