//! Browser chat UI
//!
//! The page and its script are compiled into the binary.

use crate::state::AppState;
use axum::{http::header, response::Html, response::IntoResponse, routing::get, Router};

const INDEX_HTML: &str = include_str!("../../static/index.html");
const APP_JS: &str = include_str!("../../static/app.js");

/// Create UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/static/app.js", get(app_js))
}

/// GET / - Chat page
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /static/app.js - Chat page script
async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        APP_JS,
    )
}
