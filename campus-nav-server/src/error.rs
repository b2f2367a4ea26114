//! Errors of the HTTP layer.
//!
//! [`AppError`] is returned from handlers and rendered as
//! `{"error": {"code", "message"}}`. Messages of internal errors are logged
//! and never sent to the client. [`ServerError`] covers startup failures.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use campus_nav_core::Error as CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("no route found from {from} to {to}")]
    NoRoute { from: String, to: String },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("request timed out")]
    Timeout,

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::NoRoute { .. } => (StatusCode::NOT_FOUND, "NO_ROUTE"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Timeout => (StatusCode::REQUEST_TIMEOUT, "TIMEOUT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => {
                tracing::error!(error = %self, "internal server error");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownNode(id) => Self::NotFound(format!("unknown location {id}")),
            CoreError::NoPathExists { from, to } => Self::NoRoute { from, to },
            CoreError::DuplicateNode(id) => Self::Conflict(format!("location {id} already exists")),
            CoreError::InvalidCoordinate { .. }
            | CoreError::InvalidLocation(_)
            | CoreError::InvalidWeight { .. }
            | CoreError::EmptyNodeSet
            | CoreError::NoReachableEdge
            | CoreError::IterationLimitExceeded(_) => Self::Validation(err.to_string()),
            CoreError::InvalidData(_)
            | CoreError::GeoJsonError(_)
            | CoreError::IoError(_)
            | CoreError::CsvError(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// Failures while starting the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_statuses() {
        let cases = [
            (CoreError::UnknownNode("X".into()), StatusCode::NOT_FOUND),
            (
                CoreError::NoPathExists {
                    from: "A".into(),
                    to: "B".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (CoreError::DuplicateNode("A".into()), StatusCode::CONFLICT),
            (
                CoreError::InvalidCoordinate { lat: 91.0, lng: 0.0 },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (CoreError::EmptyNodeSet, StatusCode::UNPROCESSABLE_ENTITY),
            (
                CoreError::InvalidLocation("id is empty".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                CoreError::InvalidData("broken".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_and_code().0, status);
        }
    }

    #[test]
    fn no_route_message() {
        let err = AppError::from(CoreError::NoPathExists {
            from: "A".into(),
            to: "B".into(),
        });
        assert_eq!(err.to_string(), "no route found from A to B");
        assert_eq!(err.status_and_code().1, "NO_ROUTE");
    }

    #[test]
    fn internal_message_is_hidden() {
        let response = AppError::Internal("disk on fire".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
