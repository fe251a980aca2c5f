//! Liveness and readiness endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::state::AppState;

/// `GET /ping`
pub async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub environment: String,
}

/// `GET /health`: 503 when the database does not answer.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = state.db.health_check().await;
    let (status, label) = if database {
        (StatusCode::OK, "serving")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_serving")
    };

    (
        status,
        Json(HealthResponse {
            status: label,
            database,
            environment: state.config.environment.clone(),
        }),
    )
}
