use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

use crate::error::BfhlError;
use crate::models::{Envelope, Operation};
use crate::services::{execute, metrics};
use crate::startup::AppState;

/// `POST /bfhl`: decode the single-key body, run the operation and wrap the
/// outcome in an envelope.
pub async fn process_bfhl(State(state): State<AppState>, body: Bytes) -> Response {
    let email = state.config.official_email.as_str();

    let operation = match parse_body(&body).and_then(|value| Operation::from_body(&value)) {
        Ok(operation) => operation,
        Err(err) => return failure(email, "unknown", err),
    };

    let name = operation.name();
    tracing::info!(operation = name, "Dispatching operation");

    match execute(
        operation,
        state.text_provider.as_ref(),
        state.config.limits.max_fibonacci_terms,
    )
    .await
    {
        Ok(payload) => {
            metrics::record_request(name, "success");
            (StatusCode::OK, Json(Envelope::success(email, payload))).into_response()
        }
        Err(err) => failure(email, name, err),
    }
}

/// An empty body counts as an empty object.
fn parse_body(body: &[u8]) -> Result<Value, BfhlError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|_| BfhlError::MalformedBody)
}

fn failure(email: &str, operation: &str, err: BfhlError) -> Response {
    match &err {
        BfhlError::Internal(cause) => {
            metrics::record_request(operation, "error");
            tracing::error!(operation, error = %format!("{:#}", cause), "Request failed");
        }
        _ => {
            metrics::record_request(operation, "invalid");
            tracing::warn!(operation, error = %err, "Rejected request");
        }
    }

    (err.status(), Json(Envelope::failure(email, err.to_string()))).into_response()
}
