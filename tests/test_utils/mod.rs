//! Test utilities for integration tests

use std::sync::{Arc, RwLock};

use axum::{Router, body::Body};

use commitmap::api::AppState;
use commitmap::api::app;
use commitmap::core::AppConfig;

/// Creates a test application router with no platform credentials so
/// both sources are skipped and no network requests are made.
pub fn test_app() -> Router {
    let config = AppConfig {
        github_token: None,
        gitlab_token: None,
        github_api_url: "http://127.0.0.1:9".to_string(),
        gitlab_api_url: "http://127.0.0.1:9".to_string(),
    };
    let state = Arc::new(RwLock::new(AppState::new(config)));
    app(state)
}

/// Collect a response body into a string
pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("Response body was not valid UTF-8")
}
