//! Chat and history API routes

use crate::error::ApiResult;
use crate::repositories::ChatLogRepository;
use crate::services::ChatService;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use health_coach_shared::{ChatLogEntry, ChatRequest, ChatResponse, HistoryQuery};

/// Create chat routes
pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/history", get(get_history))
}

/// POST /chat - Answer a question
///
/// The body is read leniently: a missing, non-JSON or non-object body is
/// treated as `{}` and every field falls back to its default. Always 200.
async fn chat(State(state): State<AppState>, body: Bytes) -> Json<ChatResponse> {
    let login_name = std::env::var("USER").ok();
    let input = ChatRequest::from_body(&body).normalize(login_name.as_deref());

    Json(ChatService::respond(&state, &input).await)
}

/// GET /history - Stored interactions, newest first
///
/// Supports `limit` (default: 100, max: 1000).
async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<ChatLogEntry>>> {
    let records = ChatLogRepository::get_recent(state.db(), query.limit()).await?;

    Ok(Json(records.into_iter().map(ChatLogEntry::from).collect()))
}
