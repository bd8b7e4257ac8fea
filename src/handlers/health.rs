use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::json;

use crate::AppState;

/// Component health status
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Up,
    Down,
}

#[derive(Debug, Serialize)]
struct ComponentHealth {
    status: ComponentStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/live", get(liveness_check))
        .route("/ready", get(readiness_check))
}

/// Liveness probe: the process is running.
async fn liveness_check() -> impl IntoResponse {
    Json(json!({
        "status": "up",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Readiness probe: the document store answers a ping.
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let database = match state.store.ping().await {
        Ok(()) => ComponentHealth {
            status: ComponentStatus::Up,
            message: "connected".to_string(),
            latency_ms: Some(start.elapsed().as_millis() as u64),
        },
        Err(err) => ComponentHealth {
            status: ComponentStatus::Down,
            message: err.response_message(),
            latency_ms: None,
        },
    };

    let (status, overall) = match database.status {
        ComponentStatus::Up => (StatusCode::OK, "up"),
        ComponentStatus::Down => (StatusCode::SERVICE_UNAVAILABLE, "down"),
    };

    (
        status,
        Json(json!({
            "status": overall,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": { "database": database }
        })),
    )
}
