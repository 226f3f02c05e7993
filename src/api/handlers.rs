//! HTTP request handlers

use super::types::{
    AiTestResponse, ApiKeyRequest, ChatRequest, ErrorResponse, JournalRequest, VersionResponse,
};
use super::AppState;
use crate::policy::{context_texts, PolicyStatus, ReplyResult, ValidationResult};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};

const AI_TEST_MESSAGE: &str = "Hello, how are you?";

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Chat replies
        .route("/api/chat", post(send_chat))
        // Journal feedback
        .route("/api/journal/analyze", post(analyze_journal))
        // AI configuration
        .route("/api/ai/status", get(get_status))
        .route("/api/ai/key", put(set_api_key).delete(clear_api_key))
        .route("/api/ai/validate", post(validate_api_key))
        .route("/api/ai/test", post(test_ai))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chat
// ============================================================

async fn send_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ReplyResult>, AppError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let context = context_texts(&req.history);
    tracing::debug!(context_len = context.len(), "Chat message received");

    Ok(Json(state.policy.get_reply(message, &context).await))
}

async fn analyze_journal(
    State(state): State<AppState>,
    Json(req): Json<JournalRequest>,
) -> Result<Json<ReplyResult>, AppError> {
    if req.entry.trim().is_empty() {
        return Err(AppError::BadRequest("Journal entry cannot be empty".to_string()));
    }

    Ok(Json(state.policy.get_journal_analysis(&req.entry).await))
}

// ============================================================
// AI Configuration
// ============================================================

async fn get_status(State(state): State<AppState>) -> Json<PolicyStatus> {
    Json(state.policy.status())
}

async fn set_api_key(
    State(state): State<AppState>,
    Json(req): Json<ApiKeyRequest>,
) -> Json<PolicyStatus> {
    state.policy.initialize(Some(req.api_key)).await;
    Json(state.policy.status())
}

async fn clear_api_key(State(state): State<AppState>) -> Json<PolicyStatus> {
    state.policy.initialize(None).await;
    Json(state.policy.status())
}

async fn validate_api_key(
    State(state): State<AppState>,
    Json(req): Json<ApiKeyRequest>,
) -> Json<ValidationResult> {
    Json(state.policy.validate_api_key(&req.api_key).await)
}

/// Validate a key, then send one greeting through the normal reply path
async fn test_ai(
    State(state): State<AppState>,
    Json(req): Json<ApiKeyRequest>,
) -> Json<AiTestResponse> {
    let validation = state.policy.validate_api_key(&req.api_key).await;
    let reply = if validation.valid {
        Some(state.policy.get_reply(AI_TEST_MESSAGE, &[]).await)
    } else {
        None
    };

    Json(AiTestResponse { validation, reply })
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
