// 🌐 HTTP transport - chat endpoint for the dashboard (axum)
//
// Only malformed requests get a non-success status. Classification problems
// are already absorbed by the Assistant and come back as normal 200 replies.

use crate::dispatch::{Assistant, DispatchOutcome};
use crate::intent::ClassifierSource;
use crate::model::Snapshot;
use crate::tools::ToolName;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

const BAD_REQUEST_REPLY: &str = "I couldn't read that request. Send a message and the current data.";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    assistant: Arc<Assistant>,
    snapshot: Arc<Snapshot>,
}

impl AppState {
    pub fn new(assistant: Assistant, snapshot: Snapshot) -> Self {
        Self {
            assistant: Arc::new(assistant),
            snapshot: Arc::new(snapshot),
        }
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

/// POST /api/chat body, as sent by the dashboard
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,

    pub data: Snapshot,

    /// UI context (current view etc.); accepted and ignored
    #[serde(default)]
    pub context: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub classifier: ClassifierSource,
    pub outcome: DispatchOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<ToolName>,
    pub request_id: Uuid,
}

#[derive(Debug, Serialize)]
struct ChatError {
    response: &'static str,
    error: String,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/snapshot - Data this instance was started with
async fn get_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.snapshot.as_ref().clone()))
}

/// POST /api/chat - Resolve one chat message against the supplied data
async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(%request_id, error = %rejection.body_text(), "Rejected chat request");
            return bad_request(rejection.body_text());
        }
    };

    if request.message.trim().is_empty() {
        warn!(%request_id, "Rejected chat request with empty message");
        return bad_request("message must not be empty".to_string());
    }

    let reply = state
        .assistant
        .classify_and_respond(&request.message, &request.data)
        .await;

    info!(
        %request_id,
        outcome = ?reply.outcome,
        classifier = ?reply.source,
        "Chat message answered"
    );

    let body = ChatResponse {
        response: reply.text,
        classifier: reply.source,
        outcome: reply.outcome,
        tool: reply.tool,
        request_id,
    };

    (StatusCode::OK, Json(body)).into_response()
}

fn bad_request(error: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ChatError {
            response: BAD_REQUEST_REPLY,
            error,
        }),
    )
        .into_response()
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState, request_timeout: Duration) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/snapshot", get(get_snapshot))
        .route("/chat", post(chat))
        .with_state(state);

    Router::new().nest("/api", api_routes).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(request_timeout))
            .layer(CorsLayer::permissive()),
    )
}
