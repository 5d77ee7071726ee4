use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::lifecycle::flow::LifecycleError;
use crate::lifecycle::validation::QuizValidationError;
use crate::persistence::PersistenceError;
use crate::progress::entries::EntryValidationError;
use crate::progress::metrics::MetricsValidationError;
use crate::progress::tracker::CheckInError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Persistence error: {0}")]
    Persistence(PersistenceError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Undecodable stored records are a server fault, not an unavailable store.
impl From<PersistenceError> for AppError {
    fn from(e: PersistenceError) -> Self {
        match e {
            PersistenceError::Decode(msg) => {
                AppError::Internal(anyhow::anyhow!("stored record could not be decoded: {msg}"))
            }
            other => AppError::Persistence(other),
        }
    }
}

impl From<QuizValidationError> for AppError {
    fn from(e: QuizValidationError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<MetricsValidationError> for AppError {
    fn from(e: MetricsValidationError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<CheckInError> for AppError {
    fn from(e: CheckInError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<EntryValidationError> for AppError {
    fn from(e: EntryValidationError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<LifecycleError> for AppError {
    fn from(e: LifecycleError) -> Self {
        match e {
            LifecycleError::NoProfile(_) => AppError::NotFound(e.to_string()),
            LifecycleError::Persistence(inner) => inner.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Persistence(e) => {
                tracing::error!("Persistence error: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "PERSISTENCE_ERROR",
                    "The record store could not complete the request".to_string(),
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
