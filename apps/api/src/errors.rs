use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::flows::FlowError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Flow(#[from] FlowError),
}

/// Malformed or mistyped request bodies are the caller's fault, reported like any
/// other validation failure.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, retryable) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                None,
            ),
            AppError::Flow(FlowError::Validation { .. }) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.to_string(),
                None,
            ),
            AppError::Flow(FlowError::Provider { message, retryable }) => {
                tracing::error!("Provider error (retryable={retryable}): {message}");
                let status = if *retryable {
                    StatusCode::SERVICE_UNAVAILABLE
                } else {
                    StatusCode::BAD_GATEWAY
                };
                (
                    status,
                    "PROVIDER_ERROR",
                    "The AI provider failed to respond".to_string(),
                    Some(*retryable),
                )
            }
            AppError::Flow(FlowError::OutputSchema(msg)) => {
                tracing::error!("Output schema error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "OUTPUT_SCHEMA_ERROR",
                    "The AI provider returned an unusable response".to_string(),
                    Some(false),
                )
            }
            AppError::Flow(FlowError::ContractViolation(msg)) => {
                tracing::error!("Contract violation: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "CONTRACT_VIOLATION",
                    msg.clone(),
                    Some(false),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(retryable) = retryable {
            error["retryable"] = json!(retryable);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
