//! Error handling for the relay
//!
//! This module defines all error types used throughout the service.

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the relay
pub type Result<T> = std::result::Result<T, RelayError>;

/// Main error type for the relay
#[derive(Error, Debug)]
pub enum RelayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client errors (provider API)
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Webhook authentication failures
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Malformed or unexpected webhook payloads
    #[error("Payload error: {0}")]
    Payload(String),

    /// Chainhook registration errors
    #[error("Registrar error: {0}")]
    Registrar(String),

    /// Internal server errors
    #[error("Server error: {0}")]
    Server(String),
}

impl RelayError {
    /// Create a server error from any displayable value
    pub fn server(msg: impl Into<String>) -> Self {
        RelayError::Server(msg.into())
    }
}

impl ResponseError for RelayError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            RelayError::Unauthorized(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                self.to_string(),
            ),
            // Extraction failures respond with a server error; the payload
            // is never echoed back to the caller.
            RelayError::Payload(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "PAYLOAD_ERROR",
                "Failed to process webhook".to_string(),
            ),
            RelayError::HttpClient(_) | RelayError::Registrar(_) => (
                actix_web::http::StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "Upstream provider request failed".to_string(),
            ),
            RelayError::Config(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                self.to_string(),
            ),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
