use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error payload returned by every JSON endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `"error"`
    #[schema(example = "error")]
    pub status: String,
    /// Human-readable error description
    #[schema(example = "Item not found")]
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Missing or invalid required input.
    #[error("{0}")]
    BadRequest(String),

    /// A referenced entity is absent.
    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Document encode error: {0}")]
    BsonEncode(#[from] bson::ser::Error),

    #[error("Document decode error: {0}")]
    BsonDecode(#[from] bson::de::Error),

    /// Anything else, including malformed stored data and coercion failures.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::BsonEncode(_) | Self::BsonDecode(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the error message suitable for HTTP responses.
    /// Store and codec errors return generic messages to avoid leaking
    /// implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::Database(_) => "Database error".to_string(),
            Self::BsonEncode(_) | Self::BsonDecode(_) => "Invalid stored document".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            status: "error".to_string(),
            message: self.response_message(),
        };

        (status, Json(body)).into_response()
    }
}
