//! Smoke tests for the HTTP handler endpoints.
//!
//! Everything here runs against the real router over fresh temp-dir state
//! with no API key configured, so the provider-dependent paths exercise
//! their degraded behavior: capture keeps the thought untagged, enhance
//! refuses with a structured error.
//!
//! Run with: `cargo test --test handler_tests`

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::json;
use tempfile::TempDir;
use tower::ServiceExt;

use living_graph::{
    config::ServerConfig,
    handlers::{build_router, AppState},
};

// ── test infrastructure ──

/// Self-contained harness with a fresh temp directory and blob store.
struct Harness {
    state: Arc<AppState>,
    _dir: TempDir,
}

impl Harness {
    fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let config = ServerConfig {
            data_dir: dir.path().to_path_buf(),
            ..ServerConfig::default()
        };
        let state = Arc::new(AppState::new(config).expect("create app state"));
        Self { state, _dir: dir }
    }

    fn app(&self) -> Router {
        build_router(self.state.clone())
    }
}

// ── request helpers ──

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    let bytes = serde_json::to_vec(&body).unwrap();
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(bytes))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// ── response helpers ──

async fn status_of(app: Router, req: Request<Body>) -> StatusCode {
    app.oneshot(req).await.unwrap().status()
}

async fn json_of(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let val = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, val)
}

// ═══════════════════════════════════════════════════════════════════════
// health.rs
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn health_reports_counts_and_provider_state() {
    let h = Harness::new();
    let (status, body) = json_of(h.app(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["thoughts"], 0);
    assert_eq!(body["tags"], 0);
    assert_eq!(body["provider_configured"], false);
}

// ═══════════════════════════════════════════════════════════════════════
// thoughts.rs
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn capture_without_provider_keeps_thought_untagged() {
    let h = Harness::new();
    let (status, body) = json_of(
        h.app(),
        post_json("/api/thoughts", json!({"text": "Learning Rust ownership"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "Learning Rust ownership");
    assert_eq!(body["atp"], 100.0);
    assert_eq!(body["status"], "active");
    assert_eq!(body["tags"], json!([]));
}

#[tokio::test]
async fn capture_rejects_empty_text() {
    let h = Harness::new();
    let (status, body) = json_of(
        h.app(),
        post_json("/api/thoughts", json!({"text": "   "})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn list_returns_captured_thoughts_newest_first() {
    let h = Harness::new();
    status_of(h.app(), post_json("/api/thoughts", json!({"text": "first"}))).await;
    status_of(h.app(), post_json("/api/thoughts", json!({"text": "second"}))).await;

    let (status, body) = json_of(h.app(), get("/api/thoughts")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["text"], "second");
    assert_eq!(body[1]["text"], "first");
}

#[tokio::test]
async fn boost_thought_caps_at_full_energy() {
    let h = Harness::new();
    let (_, captured) = json_of(
        h.app(),
        post_json("/api/thoughts", json!({"text": "boost me"})),
    )
    .await;
    let id = captured["id"].as_str().unwrap().to_string();

    let (status, body) = json_of(
        h.app(),
        post_empty(&format!("/api/thoughts/{id}/boost")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // Already at 100; the boost clamps instead of overshooting.
    assert_eq!(body["atp"], 100.0);
}

#[tokio::test]
async fn boost_unknown_thought_is_404() {
    let h = Harness::new();
    let (status, body) = json_of(
        h.app(),
        post_empty(&format!("/api/thoughts/{}/boost", uuid::Uuid::new_v4())),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "THOUGHT_NOT_FOUND");
}

// ═══════════════════════════════════════════════════════════════════════
// tags.rs
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn tags_list_is_empty_on_fresh_state() {
    let h = Harness::new();
    let (status, body) = json_of(h.app(), get("/api/tags")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn tag_boost_and_thoughts_reject_unknown_id() {
    let h = Harness::new();
    let id = uuid::Uuid::new_v4();

    let (status, body) = json_of(h.app(), post_empty(&format!("/api/tags/{id}/boost"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "TAG_NOT_FOUND");

    let status = status_of(h.app(), get(&format!("/api/tags/{id}/thoughts"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ═══════════════════════════════════════════════════════════════════════
// enhance.rs
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn enhance_without_provider_is_a_structured_refusal() {
    let h = Harness::new();
    let (status, body) = json_of(
        h.app(),
        post_json("/api/enhance", json!({"prompt": "write a blog post"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "PROVIDER_NOT_CONFIGURED");
}

#[tokio::test]
async fn enhance_rejects_empty_prompt() {
    let h = Harness::new();
    let (status, body) = json_of(
        h.app(),
        post_json("/api/enhance", json!({"prompt": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}
