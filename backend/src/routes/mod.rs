//! Route definitions for the Health Coach API
//!
//! This module organizes all routes and applies middleware.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod chat;
mod export;
mod health;
mod ui;

pub use chat::chat_routes;
pub use export::export_routes;
pub use ui::ui_routes;

/// Headroom on top of the generator timeout before a request is cut off
const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 10;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let request_timeout =
        Duration::from_secs(state.config().generator.timeout_secs + REQUEST_TIMEOUT_MARGIN_SECS);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .merge(ui::ui_routes())
        .merge(chat::chat_routes())
        .merge(export::export_routes())
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
