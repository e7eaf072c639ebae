//! Error types for aivr-server
//!
//! Static file responses use short plain-text bodies; API responses use a
//! JSON error object.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Static asset error (plain-text body)
#[derive(Debug, Error)]
pub enum AssetError {
    /// File missing or a directory (404)
    #[error("Not found")]
    NotFound,

    /// Path resolves outside the asset root (403)
    #[error("Forbidden")]
    Forbidden,

    /// Path could not be percent-decoded (400)
    #[error("Bad request")]
    BadRequest,

    /// Method other than GET (405)
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Any other read failure (500)
    #[error("Internal server error")]
    Io(#[from] std::io::Error),
}

impl AssetError {
    pub fn status(&self) -> StatusCode {
        match self {
            AssetError::NotFound => StatusCode::NOT_FOUND,
            AssetError::Forbidden => StatusCode::FORBIDDEN,
            AssetError::BadRequest => StatusCode::BAD_REQUEST,
            AssetError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AssetError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AssetError {
    fn into_response(self) -> Response {
        if let AssetError::Io(ref e) = self {
            error!("Failed to read asset: {}", e);
        }
        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

/// API error type (JSON body)
#[derive(Debug, Error)]
pub enum ApiError {
    /// Selection not possible (503)
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE", msg),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
