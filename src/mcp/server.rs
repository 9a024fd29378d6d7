//! HTTP tool server exposing `get_random_fact` under `/.well-known/mcp`

use super::facts::{FactError, FactSource};
use super::types::{ErrorDetail, ToolInfo, ToolUseRequest, ToolUseResponse};
use crate::config::Config;
use crate::tools::GET_RANDOM_FACT;
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

const TOOL_DESCRIPTION: &str = "Returns a random interesting fact in English from a public API. \
     This tool does not accept any parameters.";

pub const TOOLS_PATH: &str = "/.well-known/mcp/tools";
pub const TOOL_USE_PATH: &str = "/.well-known/mcp/tool/use";

struct ToolServerState {
    facts: FactSource,
}

/// Build the tool server router around a fact source
pub fn router(facts: FactSource) -> Router {
    let state = Arc::new(ToolServerState { facts });
    Router::new()
        .route(TOOLS_PATH, get(list_tools))
        .route(TOOL_USE_PATH, post(use_tool))
        .with_state(state)
}

/// Run the tool server until the process is stopped
pub async fn run_tool_server(config: &Config) -> Result<()> {
    let facts = FactSource::new(
        &config.tool_server.facts_url,
        Duration::from_secs(config.tools.timeout_secs),
    )?;
    let app = router(facts);

    let addr: SocketAddr =
        format!("{}:{}", config.tool_server.host, config.tool_server.port).parse()?;
    tracing::info!("Tool server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn list_tools() -> Json<Vec<ToolInfo>> {
    Json(vec![ToolInfo {
        name: GET_RANDOM_FACT.to_string(),
        description: TOOL_DESCRIPTION.to_string(),
    }])
}

async fn use_tool(
    State(state): State<Arc<ToolServerState>>,
    Json(req): Json<ToolUseRequest>,
) -> impl IntoResponse {
    if req.tool_name != GET_RANDOM_FACT {
        tracing::warn!("Unknown tool requested: {}", req.tool_name);
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorDetail {
                detail: format!("Tool with name '{}' not found.", req.tool_name),
            }),
        )
            .into_response();
    }

    match state.facts.random_fact().await {
        Ok(content) => (StatusCode::OK, Json(ToolUseResponse { content })).into_response(),
        Err(e @ FactError::Status(_)) => {
            tracing::error!("Fact API error: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorDetail {
                    detail: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
