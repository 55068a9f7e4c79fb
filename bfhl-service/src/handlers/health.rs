use axum::{extract::State, response::IntoResponse, Json};

use crate::models::Envelope;
use crate::startup::AppState;

/// Liveness probe; always healthy while the process serves requests.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(Envelope::healthy(&state.config.official_email)).into_response()
}
