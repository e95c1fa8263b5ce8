//! Data export API routes

use crate::error::ApiError;
use crate::services::ExportService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::get,
    Router,
};

/// Create export routes
pub fn export_routes() -> Router<AppState> {
    Router::new().route("/export.csv", get(export_csv))
}

/// GET /export.csv - Export the chat history as CSV
async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let csv = ExportService::export_chat_csv(state.db()).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=chat_history.csv"),
    );

    Ok((headers, csv))
}
