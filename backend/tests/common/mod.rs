//! Common test utilities for integration tests
//!
//! Every test app gets its own in-memory record store, so tests need no
//! external services and never see each other's rows.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use health_coach_backend::{
    config::{AppConfig, FlavorConfig, GeneratorConfig},
    db, routes,
    state::AppState,
};
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
}

impl TestApp {
    /// Create a new test application backed by a migrated in-memory store
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a test application whose generator calls `url`
    pub async fn with_generator_url(url: &str) -> Self {
        let mut config = test_config();
        config.generator = GeneratorConfig {
            url: Some(url.to_string()),
            timeout_secs: 2,
            ..GeneratorConfig::default()
        };
        Self::with_config(config).await
    }

    /// Create a test application whose record store has no tables, so
    /// every write fails
    pub async fn without_migrations() -> Self {
        let pool = create_test_pool().await;
        let app = routes::create_router(AppState::new(pool.clone(), test_config()));
        Self { app, pool }
    }

    async fn with_config(config: AppConfig) -> Self {
        let pool = create_test_pool().await;
        db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(pool.clone(), config);
        let app = routes::create_router(state);

        Self { app, pool }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    /// Make a GET request, returning the response headers too
    pub async fn get_with_headers(
        &self,
        path: &str,
    ) -> (StatusCode, axum::http::HeaderMap, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    /// Number of stored chat interactions
    pub async fn chat_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM chats")
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count chats")
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        server: health_coach_backend::config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: health_coach_backend::config::DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        generator: GeneratorConfig::default(),
        flavor: FlavorConfig { seed: Some(7) },
    }
}

async fn create_test_pool() -> SqlitePool {
    db::create_pool("sqlite::memory:", 1)
        .await
        .expect("Failed to create test record store")
}
