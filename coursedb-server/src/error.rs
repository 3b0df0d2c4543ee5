//! Error types of the HTTP layer.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use coursedb::error::CourseStoreError;

/// Errors rendered as JSON responses.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CourseStoreError> for ApiError {
    fn from(err: CourseStoreError) -> Self {
        match err {
            CourseStoreError::InvalidCourse(msg) => ApiError::BadRequest(msg),
            err if err.is_storage() => ApiError::Storage(err.to_string()),
            err => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Storage(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        }

        let body = Json(ErrorResponse {
            error: message,
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Failures that stop the server from starting or running.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to open course store: {0}")]
    Store(#[from] CourseStoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
