/// Error types for Around Service
///
/// Every failure on the request path ends up here and is rendered as an HTTP
/// response. None of them stop the server.
use crate::services::store::StoreError;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use std::time::Duration;
use utoipa::ToSchema;

/// Result type for around-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed request body or query string
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Well-formed input that breaks a domain rule
    #[error("Validation error: {0}")]
    Validation(String),

    /// Search backend could not be reached or refused the operation
    #[error("Search backend unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// Search backend did not answer before the request deadline
    #[error("Search backend timed out after {0:?}")]
    Timeout(Duration),

    /// Response body could not be produced
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// JSON body returned with every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub status: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %error_msg, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %error_msg, "request rejected");
        }

        HttpResponse::build(status).json(ErrorBody {
            error: error_msg,
            status: status.as_u16(),
        })
    }
}
