//! Error types for aidet-server
//!
//! Every failure is converted to the wire contract's `{"message": ...}`
//! body at this boundary. Internal detail (vendor responses, transport
//! errors) stays in the operational log and never reaches the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::sightengine_client::SightengineError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request carried no `file` multipart field (400)
    #[error("No file uploaded")]
    MissingUpload,

    /// Unreadable or malformed multipart body (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Vendor credentials absent from configuration (500)
    #[error("API credentials not configured")]
    MissingCredentials,

    /// Vendor analysis failed (500); detail swallowed
    #[error("Analysis failed: {0}")]
    Analysis(#[from] SightengineError),

    /// Generic error (500)
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingUpload => (StatusCode::BAD_REQUEST, "No file uploaded"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Malformed upload"),
            ApiError::MissingCredentials => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "API credentials not configured on server",
            ),
            ApiError::Analysis(_) | ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error processing request",
            ),
        };

        let body = Json(json!({ "message": message }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
