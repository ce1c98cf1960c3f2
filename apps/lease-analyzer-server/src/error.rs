//! Error types for the lease analyzer server

use analysis_client::AnalysisError;
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use compliance_engine::{CatalogError, RenderError};
use serde::Serialize;
use shared_pdf::ExtractError;
use shared_types::DocumentError;
use thiserror::Error;
use usage_guard::UsageError;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("A valid email address is required")]
    InvalidEmail,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Free analysis already used")]
    QuotaExhausted,

    #[error("Usage guard unavailable: {0}")]
    UsageGuardUnavailable(String),

    #[error("Document unreadable: {0}")]
    DocumentUnreadable(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ServerError::InvalidEmail => (
                StatusCode::BAD_REQUEST,
                "INVALID_EMAIL",
                "Please enter a valid email address.".to_string(),
            ),
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            ServerError::UnsupportedMediaType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                msg.clone(),
            ),
            ServerError::QuotaExhausted => (
                StatusCode::FORBIDDEN,
                "QUOTA_EXHAUSTED",
                "This email has already used its free lease analysis.".to_string(),
            ),
            ServerError::UsageGuardUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "USAGE_GUARD_UNAVAILABLE",
                "Usage could not be verified right now. Please try again later.".to_string(),
            ),
            ServerError::DocumentUnreadable(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "DOCUMENT_UNREADABLE",
                format!("The lease could not be read: {}", msg),
            ),
            ServerError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                "Too many requests. Please wait and try again.".to_string(),
            ),
            ServerError::AnalysisFailed(_) => (
                StatusCode::BAD_GATEWAY,
                "ANALYSIS_FAILED",
                "The lease analysis service failed. Please try again later.".to_string(),
            ),
            ServerError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<UsageError> for ServerError {
    fn from(err: UsageError) -> Self {
        match err {
            UsageError::InvalidEmail => ServerError::InvalidEmail,
            other => ServerError::UsageGuardUnavailable(other.to_string()),
        }
    }
}

impl From<AnalysisError> for ServerError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::RateLimited => ServerError::RateLimited,
            other @ (AnalysisError::Service(_) | AnalysisError::Configuration(_)) => {
                ServerError::AnalysisFailed(other.to_string())
            }
        }
    }
}

impl From<DocumentError> for ServerError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::UnsupportedMediaType(_) => {
                ServerError::UnsupportedMediaType(err.to_string())
            }
            DocumentError::Empty => ServerError::DocumentUnreadable(err.to_string()),
        }
    }
}

impl From<ExtractError> for ServerError {
    fn from(err: ExtractError) -> Self {
        ServerError::DocumentUnreadable(err.to_string())
    }
}

impl From<CatalogError> for ServerError {
    fn from(err: CatalogError) -> Self {
        ServerError::Internal(err.to_string())
    }
}

impl From<RenderError> for ServerError {
    fn from(err: RenderError) -> Self {
        ServerError::Internal(err.to_string())
    }
}

impl From<MultipartError> for ServerError {
    fn from(err: MultipartError) -> Self {
        ServerError::InvalidRequest(err.body_text())
    }
}
