use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::{ExtractionError, PipelineError};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Generation error: {message}")]
    Generation { message: String, retryable: bool },

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Whether the client may resubmit the same upload and expect a different outcome.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Generation { retryable, .. } => *retryable,
            AppError::Timeout(_) => true,
            _ => false,
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        let retryable = err.is_transient();
        match err {
            PipelineError::DocumentFormat(e) => AppError::UnprocessableEntity(e.to_string()),
            PipelineError::Extraction(ExtractionError::Generation(e)) => AppError::Generation {
                message: e.to_string(),
                retryable,
            },
            PipelineError::Extraction(e) => AppError::Extraction(e.to_string()),
            e @ PipelineError::TimedOut(_) => AppError::Timeout(e.to_string()),
            PipelineError::Worker(e) => AppError::Internal(e.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Generation { message, retryable } => {
                tracing::error!("Generation error (retryable: {retryable}): {message}");
                let hint = if *retryable {
                    "The text generation service failed; retry the upload"
                } else {
                    "The text generation service rejected the request"
                };
                (StatusCode::BAD_GATEWAY, "GENERATION_ERROR", hint.to_string())
            }
            AppError::Extraction(msg) => {
                tracing::error!("Extraction error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXTRACTION_ERROR",
                    "Could not build a record from the generated output".to_string(),
                )
            }
            AppError::Timeout(msg) => {
                tracing::error!("Timeout: {msg}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "TIMEOUT",
                    "Extraction took too long; retry the upload".to_string(),
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
                "message": message,
                "retryable": self.is_retryable()
            }
        }));

        (status, body).into_response()
    }
}
