//! Integration Tests for API Endpoints
//!
//! Drives the full request/response cycle against a counting stub model.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use sume::{
    api::create_router,
    cache::Cache,
    error::{AppError, Result},
    services::{LanguageModel, SummaryService},
    AppState, Config,
};
use tempfile::TempDir;
use tower::ServiceExt;

// == Helper Functions ==

/// Counts calls and can be told to fail the next N of them.
#[derive(Default)]
struct CountingModel {
    calls: AtomicUsize,
    failures_left: AtomicUsize,
}

impl CountingModel {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageModel for CountingModel {
    fn name(&self) -> &str {
        "counting"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failures_left.load(Ordering::SeqCst) > 0 {
            self.failures_left.fetch_sub(1, Ordering::SeqCst);
            return Err(AppError::Service("⚠️ Language model error: HTTP 500".to_string()));
        }
        Ok(format!("response #{} to {} chars", n, prompt.len()))
    }
}

fn create_test_app(model: Arc<CountingModel>) -> Router {
    let service = SummaryService::new(model, Cache::new(), &Config::default()).unwrap();
    create_router(AppState::new(service))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn summarize(app: &Router, text: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(post_json("/summarize", serde_json::json!({ "text": text })))
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == Memoization Tests ==

#[tokio::test]
async fn test_repeat_call_served_from_cache() {
    let model = Arc::new(CountingModel::default());
    let app = create_test_app(model.clone());

    let (status, first) = summarize(&app, "The quarterly report shows steady growth.").await;
    assert_eq!(status, StatusCode::OK);
    let (status, second) = summarize(&app, "The quarterly report shows steady growth.").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(first, second);
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let model = Arc::new(CountingModel::default());
    model.failures_left.store(1, Ordering::SeqCst);
    let app = create_test_app(model.clone());

    let (status, body) = summarize(&app, "Text that fails the first time.").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "⚠️ Language model error: HTTP 500");

    let (status, _) = summarize(&app, "Text that fails the first time.").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(model.calls(), 2);
}

#[tokio::test]
async fn test_clear_forces_recompute() {
    let model = Arc::new(CountingModel::default());
    let app = create_test_app(model.clone());

    summarize(&app, "Something worth summarizing.").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/cache")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["message"], "Cache cleared successfully!");

    summarize(&app, "Something worth summarizing.").await;
    assert_eq!(model.calls(), 2);
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_after_one_miss_two_hits() {
    let model = Arc::new(CountingModel::default());
    let app = create_test_app(model.clone());

    for _ in 0..3 {
        let (status, _) = summarize(&app, "Three identical requests.").await;
        assert_eq!(status, StatusCode::OK);
    }

    let response = app.oneshot(get("/cache/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    assert_eq!(json["misses"].as_u64().unwrap(), 1);
    assert_eq!(json["hits"].as_u64().unwrap(), 2);
    assert_eq!(json["total_entries"].as_u64().unwrap(), 1);
    assert_eq!(
        json["summary"].as_str().unwrap(),
        "Cache size: 1 items | Hits: 2 | Misses: 1 | Hit rate: 66.7%"
    );
    assert_eq!(model.calls(), 1);
}

// == Validation Tests ==

#[tokio::test]
async fn test_text_length_boundaries() {
    let model = Arc::new(CountingModel::default());
    let app = create_test_app(model.clone());

    let (status, _) = summarize(&app, "abcdefghi").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = summarize(&app, "abcdefghij").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = summarize(&app, &"a".repeat(1_000_001)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "⚠️ Text is too long. Maximum 1,000,000 characters allowed."
    );
    let (status, _) = summarize(&app, &"a".repeat(1_000_000)).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(model.calls(), 2);
}

#[tokio::test]
async fn test_short_text_end_to_end() {
    let model = Arc::new(CountingModel::default());
    let app = create_test_app(model.clone());

    let (status, body) = summarize(&app, "Short.").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("at least 10 characters"));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("setup.exe");
    std::fs::write(&path, b"MZ").unwrap();

    let model = Arc::new(CountingModel::default());
    let app = create_test_app(model.clone());

    let response = app
        .oneshot(post_json(
            "/summarize/file",
            serde_json::json!({ "path": path }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("⚠️ Unsupported file type: .exe"));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_summarize_text_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.md");
    std::fs::write(&path, "# Notes\n\nThe **launch** moved to Friday.").unwrap();

    let model = Arc::new(CountingModel::default());
    let app = create_test_app(model.clone());

    let response = app
        .oneshot(post_json(
            "/summarize/file",
            serde_json::json!({ "path": path }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn test_url_validation() {
    let app = create_test_app(Arc::new(CountingModel::default()));

    let response = app
        .oneshot(post_json(
            "/url",
            serde_json::json!({ "url": "not a url", "source": "Webpage" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_translate_custom_language() {
    let model = Arc::new(CountingModel::default());
    let app = create_test_app(model.clone());

    let response = app
        .clone()
        .oneshot(post_json(
            "/translate",
            serde_json::json!({ "text": "Good morning", "language": "Old Norse" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(post_json(
            "/translate",
            serde_json::json!({
                "text": "Good morning",
                "language": "Old Norse",
                "allow_custom": true
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn test_extend_rejects_short_prompt() {
    let model = Arc::new(CountingModel::default());
    let app = create_test_app(model.clone());

    let response = app
        .oneshot(post_json(
            "/extend",
            serde_json::json!({ "summary": "A summary.", "custom_prompt": "abc" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(model.calls(), 0);
}

// == Misc Endpoint Tests ==

#[tokio::test]
async fn test_estimate_endpoint() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("small.txt");
    std::fs::write(&path, "tiny").unwrap();

    let app = create_test_app(Arc::new(CountingModel::default()));
    let response = app
        .oneshot(post_json("/estimate", serde_json::json!({ "path": path })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["estimate"], "~5-10 seconds");
    assert_eq!(json["file"]["extension"], ".txt");
    assert_eq!(json["file"]["is_text"], true);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(Arc::new(CountingModel::default()));

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Error Response Tests ==

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app(Arc::new(CountingModel::default()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/summarize")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"invalid json"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // Axum rejects malformed JSON before the handler runs
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}
