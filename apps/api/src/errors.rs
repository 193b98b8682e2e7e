use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{0}")]
    CapacityExceeded(String),

    #[error("{0}")]
    LastRemaining(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream error: {0}")]
    Upstream(LlmError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(entity) => AppError::NotFound(format!("{entity} not found")),
            StoreError::CapacityExceeded => AppError::CapacityExceeded(
                "Maximum of 5 presets allowed. Please delete one before creating a new preset."
                    .to_string(),
            ),
            StoreError::LastRemaining => {
                AppError::LastRemaining("Cannot delete the last remaining preset".to_string())
            }
            StoreError::Backend(e) => AppError::Database(e),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingCredentials => {
                AppError::Configuration("OpenAI API key not configured".to_string())
            }
            other => AppError::Upstream(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::CapacityExceeded(msg) => {
                (StatusCode::BAD_REQUEST, "PRESET_LIMIT", msg.clone())
            }
            AppError::LastRemaining(msg) => (StatusCode::BAD_REQUEST, "LAST_PRESET", msg.clone()),
            AppError::Configuration(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "NOT_CONFIGURED", msg.clone())
            }
            AppError::Upstream(e) => {
                tracing::error!("Upstream generation error: {e}");
                let message = match e {
                    LlmError::RateLimited => {
                        "Rate limit exceeded. Please try again later.".to_string()
                    }
                    LlmError::EmptyContent => {
                        "No content generated. Please try again.".to_string()
                    }
                    _ => "Failed to generate post. Please try again.".to_string(),
                };
                (StatusCode::SERVICE_UNAVAILABLE, "UPSTREAM_ERROR", message)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
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
