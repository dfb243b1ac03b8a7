use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::feedback::pipeline::FeedbackError;
use crate::feedback::validation::ValidationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Deadline exceeded: {0}")]
    DeadlineExceeded(String),
}

impl From<FeedbackError> for AppError {
    fn from(error: FeedbackError) -> Self {
        match error {
            FeedbackError::Validation(e) => AppError::Validation(e),
            other @ FeedbackError::DeadlineExceeded(_) => {
                AppError::DeadlineExceeded(other.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string()),
            AppError::DeadlineExceeded(msg) => {
                tracing::error!("Deadline exceeded: {msg}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "DEADLINE_EXCEEDED",
                    format!("Erro ao processar feedback: {msg}"),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
