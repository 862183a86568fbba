use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::config::ConfigError;
use crate::validation::ValidationError;

/// Failures before the server accepts its first request.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Internal error: {0}")]
    InternalError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {

        AppError::MalformedPayload(rejection.body_text())

    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {

        let (status, body) = match self {
            AppError::MalformedPayload(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": "malformed_payload", "message": message }),
            ),
            AppError::Validation(ValidationError::FieldConstraints(violations)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": "validation_failed", "detail": violations }),
            ),
            AppError::Validation(ValidationError::BusinessRule { rule, message }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": "business_rule_violation", "rule": rule, "message": message }),
            ),
            AppError::InternalError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "internal_error", "message": e.to_string() }),
            ),
        };

        (status, Json(body)).into_response()

    }
}
