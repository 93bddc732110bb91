//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::services::{public_error_message, PhotoAnalysisError};

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Repository error
    Repository(RepositoryError),
    /// Rejected image upload or unreadable analysis
    PhotoAnalysis(PhotoAnalysisError),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ApiError) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", public_error_message(&msg)),
            ),
            AppError::Repository(e) => {
                let msg = e.to_string();
                if e.is_not_found() {
                    (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg))
                } else if e.is_validation() {
                    (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
                } else {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiError::new("REPOSITORY_ERROR", public_error_message(&msg)),
                    )
                }
            }
            AppError::PhotoAnalysis(e) => {
                let msg = e.to_string();
                match e {
                    PhotoAnalysisError::InvalidFormat => {
                        (StatusCode::BAD_REQUEST, ApiError::new("INVALID_FORMAT", msg))
                    }
                    PhotoAnalysisError::InvalidData | PhotoAnalysisError::MalformedResponse(_) => {
                        (StatusCode::BAD_REQUEST, ApiError::new("INVALID_DATA", msg))
                    }
                    PhotoAnalysisError::TooLarge { size_mb, max_mb } => (
                        StatusCode::PAYLOAD_TOO_LARGE,
                        ApiError::new("FILE_TOO_LARGE", msg)
                            .with_details(format!("size_mb={:.2}, max_size_mb={}", size_mb, max_mb)),
                    ),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_body();
        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<PhotoAnalysisError> for AppError {
    fn from(err: PhotoAnalysisError) -> Self {
        AppError::PhotoAnalysis(err)
    }
}
