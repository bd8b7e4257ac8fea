use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

/// Standard success envelope carrying a data payload.
pub fn success_data<T: Serialize>(data: T) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "status": "success", "data": data })),
    )
        .into_response()
}

/// Standard success envelope carrying only a message.
pub fn success_message(message: &str) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "status": "success", "message": message })),
    )
        .into_response()
}
