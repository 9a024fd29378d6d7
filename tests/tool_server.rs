//! Tool client against the tool server, backed by a fake fact API

mod common;

use axum::http::StatusCode;
use common::{dead_url, fake_fact_api, spawn};
use mcp_fact_agent::mcp::facts::{FACT_SERVICE_UNREACHABLE, NO_FACT_IN_RESPONSE};
use mcp_fact_agent::mcp::server::{router, TOOLS_PATH, TOOL_USE_PATH};
use mcp_fact_agent::mcp::{ErrorDetail, FactSource};
use mcp_fact_agent::tools::{
    McpToolClient, ToolClient, ToolClientError, FAILED_FACT_MESSAGE, GET_RANDOM_FACT,
};
use serde_json::json;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

async fn tool_server_with(facts_url: &str) -> String {
    let facts = FactSource::new(facts_url, TIMEOUT).unwrap();
    spawn(router(facts)).await
}

fn client_for(base: &str) -> McpToolClient {
    McpToolClient::new(
        &format!("{}{}", base, TOOL_USE_PATH),
        &format!("{}{}", base, TOOLS_PATH),
        TIMEOUT,
    )
    .unwrap()
}

#[tokio::test]
async fn advertises_random_fact_tool() {
    let facts_url = fake_fact_api(StatusCode::OK, json!({ "text": "unused" })).await;
    let client = client_for(&tool_server_with(&facts_url).await);

    let tools = client.list_tools().await.unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].name, GET_RANDOM_FACT);
    assert!(!tools[0].description.is_empty());
}

#[tokio::test]
async fn invoke_returns_fact_text() {
    let facts_url = fake_fact_api(
        StatusCode::OK,
        json!({ "id": "abc", "text": "Octopuses have three hearts.", "language": "en" }),
    )
    .await;
    let client = client_for(&tool_server_with(&facts_url).await);

    assert_eq!(
        client.invoke(GET_RANDOM_FACT).await,
        "Octopuses have three hearts."
    );
}

#[tokio::test]
async fn body_without_text_degrades_to_message() {
    let facts_url = fake_fact_api(StatusCode::OK, json!({ "id": "abc" })).await;
    let client = client_for(&tool_server_with(&facts_url).await);

    assert_eq!(client.invoke(GET_RANDOM_FACT).await, NO_FACT_IN_RESPONSE);
}

#[tokio::test]
async fn unreachable_fact_api_degrades_to_message() {
    let facts_url = format!("{}/random", dead_url().await);
    let client = client_for(&tool_server_with(&facts_url).await);

    assert_eq!(client.invoke(GET_RANDOM_FACT).await, FACT_SERVICE_UNREACHABLE);
}

#[tokio::test]
async fn upstream_error_status_is_bad_gateway() {
    let facts_url = fake_fact_api(StatusCode::SERVICE_UNAVAILABLE, json!({})).await;
    let client = client_for(&tool_server_with(&facts_url).await);

    let err = client.try_invoke(GET_RANDOM_FACT).await.unwrap_err();
    match err {
        ToolClientError::Status { status, .. } => assert_eq!(status, StatusCode::BAD_GATEWAY),
        other => panic!("unexpected error: {:?}", other),
    }

    // The infallible surface hides the cause
    assert_eq!(client.invoke(GET_RANDOM_FACT).await, FAILED_FACT_MESSAGE);
}

#[tokio::test]
async fn unknown_tool_is_not_found() {
    let facts_url = fake_fact_api(StatusCode::OK, json!({ "text": "unused" })).await;
    let base = tool_server_with(&facts_url).await;

    let resp = reqwest::Client::new()
        .post(format!("{}{}", base, TOOL_USE_PATH))
        .json(&json!({ "tool_name": "get_weather" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorDetail = resp.json().await.unwrap();
    assert_eq!(body.detail, "Tool with name 'get_weather' not found.");
}

#[tokio::test]
async fn unreachable_tool_server_yields_fixed_failure_text() {
    let client = client_for(&dead_url().await);

    assert_eq!(client.invoke(GET_RANDOM_FACT).await, FAILED_FACT_MESSAGE);
    assert!(matches!(
        client.try_invoke(GET_RANDOM_FACT).await,
        Err(ToolClientError::Transport(_))
    ));
}
