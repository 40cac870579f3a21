#![cfg(feature = "server")]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use banking_assistant::server::{router, AppState};
use banking_assistant::{Assistant, Snapshot, UNRESOLVED_MESSAGE};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

fn app() -> Router {
    router(
        AppState::new(Assistant::fallback_only(), Snapshot::seed()),
        Duration::from_secs(5),
    )
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_chat(body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(request).await
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "data": "OK" }));
}

#[tokio::test]
async fn test_snapshot_endpoint_serves_seed() {
    let request = Request::builder().uri("/api/snapshot").body(Body::empty()).unwrap();
    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["customers"].as_array().unwrap().len(), 4);
    assert_eq!(body["data"]["transactions"][0]["desc"], "Grocery Store");
}

#[tokio::test]
async fn test_chat_runs_tool_on_supplied_data() {
    let body = json!({
        "message": "Show retail customers",
        "context": { "view": "dashboard" },
        "data": Snapshot::seed(),
    });
    let (status, body) = post_chat(body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["response"],
        "Found 2 customers: John Doe (C001), Sarah Smith (C003)"
    );
    assert_eq!(body["classifier"], "fallback");
    assert_eq!(body["outcome"], "tool_executed");
    assert_eq!(body["tool"], "get_customers");
    assert!(body["request_id"].is_string());
}

#[tokio::test]
async fn test_chat_unresolved_is_still_ok() {
    let body = json!({ "message": "sing me a song", "data": {} });
    let (status, body) = post_chat(body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], UNRESOLVED_MESSAGE);
    assert_eq!(body["outcome"], "unresolved");
    assert!(body.get("tool").is_none());
}

#[tokio::test]
async fn test_chat_missing_data_is_bad_request() {
    let (status, body) = post_chat(json!({ "message": "help" }).to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["response"].is_string());
    assert!(body["error"].as_str().unwrap().contains("data"));
}

#[tokio::test]
async fn test_chat_unparseable_body_is_bad_request() {
    let (status, _) = post_chat("{not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_blank_message_is_bad_request() {
    let body = json!({ "message": "   ", "data": {} });
    let (status, body) = post_chat(body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "message must not be empty");
}
