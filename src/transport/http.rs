//! HTTP server for the agent endpoint

use crate::agent::{ToolOrchestrator, TurnPath};
use crate::config::Config;
use crate::llm::OllamaProvider;
use crate::tools::{McpToolClient, ToolRegistry};
use anyhow::Result;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Generic body for any failure past validation; details stay in the logs
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Shared application state
///
/// Read-only: every request runs its own independent turn.
pub struct AppState {
    orchestrator: ToolOrchestrator,
}

impl AppState {
    pub fn new(orchestrator: ToolOrchestrator) -> Self {
        Self { orchestrator }
    }
}

/// Request for one agent turn
#[derive(Debug, Deserialize)]
pub struct AgentRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Successful agent turn
#[derive(Debug, Serialize, Deserialize)]
pub struct AgentResponse {
    pub response: String,
}

/// Error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    model: String,
}

/// Build the router around an already-constructed orchestrator
pub fn router(orchestrator: ToolOrchestrator) -> Router {
    let state = Arc::new(AppState::new(orchestrator));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/agent", post(handle_agent))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_http_server(config: &Config) -> Result<()> {
    let provider = OllamaProvider::from_config(config)?;
    if !provider.is_available().await {
        tracing::warn!(
            "Ollama is not reachable at {} - requests will fail until it is. Try: ollama serve",
            config.llm.base_url
        );
    }

    let tool_client = McpToolClient::from_config(config)?;
    let orchestrator = ToolOrchestrator::new(
        Arc::new(provider),
        Arc::new(tool_client),
        ToolRegistry::with_defaults(),
    );
    let app = router(orchestrator);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("HTTP server listening on {}", addr);
    tracing::info!("Tool service: {}", config.tools.url);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.orchestrator.model().to_string(),
    })
}

async fn handle_agent(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AgentRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request_id = uuid::Uuid::new_v4();

    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!("[{}] Rejecting malformed body: {}", request_id, rejection);
            return (
                rejection.status(),
                Json(ErrorResponse {
                    error: rejection.body_text(),
                }),
            )
                .into_response();
        }
    };

    let prompt = match req.prompt {
        Some(p) if !p.trim().is_empty() => p,
        _ => {
            tracing::debug!("[{}] Rejecting request without prompt", request_id);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "prompt is required".to_string(),
                }),
            )
                .into_response();
        }
    };

    tracing::info!("[{}] Agent turn started", request_id);

    match state.orchestrator.run_turn(&prompt).await {
        Ok(outcome) => {
            match &outcome.path {
                TurnPath::Direct => {
                    tracing::info!("[{}] Answered directly", request_id)
                }
                TurnPath::ToolAssisted { tool } => {
                    tracing::info!("[{}] Answered using tool {}", request_id, tool)
                }
                TurnPath::UnknownTool { tool } => {
                    tracing::warn!("[{}] Ignored unknown tool {}", request_id, tool)
                }
            }
            (
                StatusCode::OK,
                Json(AgentResponse {
                    response: outcome.text,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("[{}] Agent API error: {:#}", request_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: INTERNAL_SERVER_ERROR.to_string(),
                }),
            )
                .into_response()
        }
    }
}
