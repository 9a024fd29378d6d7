//! Shared fixtures: fake upstream services on ephemeral ports

#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Serve a router on 127.0.0.1 and return its base URL
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Ollama stand-in answering `/api/chat` from a script
#[derive(Default)]
pub struct FakeOllama {
    replies: Mutex<VecDeque<(StatusCode, Value)>>,
    requests: Mutex<Vec<Value>>,
}

impl FakeOllama {
    pub fn new(replies: Vec<(StatusCode, Value)>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Bodies of every `/api/chat` request received so far
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn serve(self: &Arc<Self>) -> String {
        let app = Router::new()
            .route("/api/chat", post(fake_chat))
            .route("/api/tags", get(|| async { Json(json!({ "models": [] })) }))
            .with_state(Arc::clone(self));
        spawn(app).await
    }
}

async fn fake_chat(
    State(fake): State<Arc<FakeOllama>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    fake.requests.lock().unwrap().push(body);
    let (status, reply) = fake.replies.lock().unwrap().pop_front().unwrap_or((
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "script exhausted" }),
    ));
    (status, Json(reply))
}

/// Non-streaming `/api/chat` reply carrying plain text
pub fn text_reply(content: &str) -> (StatusCode, Value) {
    (
        StatusCode::OK,
        json!({
            "model": "mistral",
            "message": { "role": "assistant", "content": content },
            "done": true,
            "prompt_eval_count": 12,
            "eval_count": 7
        }),
    )
}

/// Non-streaming `/api/chat` reply requesting tool calls
pub fn tool_reply(names: &[&str]) -> (StatusCode, Value) {
    let calls: Vec<Value> = names
        .iter()
        .map(|n| json!({ "function": { "name": n, "arguments": {} } }))
        .collect();
    (
        StatusCode::OK,
        json!({
            "model": "mistral",
            "message": { "role": "assistant", "content": "", "tool_calls": calls },
            "done": true
        }),
    )
}

/// Public fact API stand-in returning a fixed body
pub async fn fake_fact_api(status: StatusCode, body: Value) -> String {
    let app = Router::new().route(
        "/random",
        get(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );
    format!("{}/random", spawn(app).await)
}
