#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use bfhl_service::config::BfhlConfig;
use bfhl_service::services::providers::mock::MockTextProvider;
use bfhl_service::services::providers::TextProvider;
use bfhl_service::startup::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_EMAIL: &str = "test.user@example.com";

pub fn test_config() -> BfhlConfig {
    BfhlConfig::with_email(TEST_EMAIL)
}

pub fn router_with(provider: Arc<dyn TextProvider>) -> Router {
    build_router(AppState::new(test_config(), provider))
}

/// Router whose AI provider answers every prompt with `reply`.
pub fn router_replying(reply: &str) -> Router {
    router_with(Arc::new(MockTextProvider::replying(reply)))
}

pub async fn post_bfhl(app: Router, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/bfhl")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    read_json(response).await
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
