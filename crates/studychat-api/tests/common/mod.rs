//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use studychat_core::clock::Clock;
use studychat_core::repository::CursorPolicy;
use studychat_test_support::FixedClock;
use tower::ServiceExt;

use studychat_api::config::AppConfig;
use studychat_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build in-memory application state with a deterministic clock.
pub fn build_test_state(cursor_policy: CursorPolicy) -> AppState {
    let config = AppConfig {
        cursor_policy,
        ..AppConfig::default()
    };
    AppState::in_memory(&config, fixed_clock())
}

/// Build the full app router over `state`. Uses the same route structure as
/// `main.rs`.
pub fn build_app(state: AppState) -> Router {
    studychat_api::app(state)
}

/// Build the full app router over fresh lenient in-memory state.
pub fn build_test_app() -> Router {
    build_app(build_test_state(CursorPolicy::Lenient))
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
