//! Router-level test harness backed by in-memory stores and stand-in processes.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::auth::TokenService;
use crate::documents::DocumentService;
use crate::jobs::memory::MemoryJobStore;
use crate::linkedin::ScraperClient;
use crate::llm_client::LlmClient;
use crate::process::ExternalCommand;
use crate::routes::build_router;
use crate::state::AppState;
use crate::users::memory::MemoryUserStore;

/// Prints its argv (after `$0`) as a JSON array of strings.
const ECHO_ARGS_JSON: &str = r#"sh -c 'printf "["; sep=""; for a in "$@"; do printf "%s\"%s\"" "$sep" "$a"; sep=","; done; printf "]"' scraper"#;

pub fn test_app() -> Router {
    let command = |line: &str| ExternalCommand::parse(line).unwrap();
    let jobs = Arc::new(MemoryJobStore::default());
    let state = AppState {
        users: Arc::new(MemoryUserStore::with_jobs(jobs.clone())),
        jobs,
        tokens: TokenService::new("test-secret", 24),
        llm: LlmClient::new(
            "test-key".to_string(),
            "gpt-4o-mini".to_string(),
            "http://127.0.0.1:1/v1",
        )
        .unwrap(),
        documents: DocumentService::new(command("true"), command("true")).unwrap(),
        scraper: ScraperClient::new(command(ECHO_ARGS_JSON)),
    };
    build_router(state)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

/// Registers `email` with first name "Test" and last name "User".
pub async fn register(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": email,
            "password": password,
            "firstName": "Test",
            "lastName": "User"
        })),
    )
    .await
}

pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body.as_str().expect("login returns a token string").to_string()
}
