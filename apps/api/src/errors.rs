#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::document::DocumentError;
use crate::matching::fusion::FusionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every user-visible failure names the stage that failed (reading vs.
/// embedding vs. scoring) so callers can tell them apart.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Fusion error: {0}")]
    Fusion(#[from] FusionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Document(DocumentError::UnsupportedFormat(ext)) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_FORMAT",
                format!("Unsupported file format: {ext}"),
            ),
            AppError::Document(e @ DocumentError::ExtractionFailure { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_FAILURE",
                e.to_string(),
            ),
            AppError::Fusion(FusionError::NoAvailableSignal) => {
                tracing::error!("Both similarity methods failed for this request");
                (
                    StatusCode::BAD_GATEWAY,
                    "NO_AVAILABLE_SIGNAL",
                    "Embedding stage failed: no similarity method produced a score".to_string(),
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
