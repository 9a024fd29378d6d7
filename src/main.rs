use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mcp_fact_agent::{mcp, transport, Config};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("FACT_AGENT_GIT_HASH"),
    ")"
);

#[derive(Parser)]
#[command(name = "fact-agent")]
#[command(author, version, long_version = LONG_VERSION)]
#[command(about = "Tool-augmented chat agent with an MCP fact tool server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the orchestration endpoint (POST /api/agent)
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Start the tool server advertising get_random_fact
    ToolServer {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Interactive chat with the agent (TUI)
    Chat {
        /// Base URL of the agent server
        #[arg(long)]
        url: Option<String>,
    },

    /// Send a single prompt and print the answer
    Ask {
        /// Prompt to send
        prompt: String,

        /// Base URL of the agent server
        #[arg(long)]
        url: Option<String>,
    },

    /// List the tools advertised by the configured tool server
    Tools,
}

fn init_logging(verbose: bool, log_file: Option<PathBuf>) -> Result<()> {
    let filter = if verbose {
        "mcp_fact_agent=debug,fact_agent=debug"
    } else {
        "mcp_fact_agent=info,fact_agent=info"
    };
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    match log_file {
        // The TUI owns the terminal, so its logs go to a file
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env_overrides();
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = match cli.command {
        Commands::Chat { .. } => Some(Config::data_dir()?.join("chat.log")),
        _ => None,
    };
    init_logging(cli.verbose, log_file)?;

    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            tracing::info!(
                "Starting agent server on {}:{} (model: {})",
                config.server.host,
                config.server.port,
                config.llm.model
            );
            transport::http::run_http_server(&config).await?;
        }
        Commands::ToolServer { port, host } => {
            if let Some(port) = port {
                config.tool_server.port = port;
            }
            if let Some(host) = host {
                config.tool_server.host = host;
            }
            mcp::server::run_tool_server(&config).await?;
        }
        Commands::Chat { url } => {
            transport::cli::run_chat(&config, url).await?;
        }
        Commands::Ask { prompt, url } => {
            transport::cli::run_ask(&config, &prompt, url).await?;
        }
        Commands::Tools => {
            transport::cli::run_tools(&config).await?;
        }
    }

    Ok(())
}
