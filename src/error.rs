//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache server.
///
/// A missing or expired key is not an error at the engine boundary (the
/// engine reports it as `None`); `NotFound` exists so the HTTP layer can
/// turn that negative result into a response.
#[derive(Error, Debug)]
pub enum CacheError {
    /// No live item for the requested key
    #[error("item not found for key: {0}")]
    NotFound(String),

    /// Create-only endpoint hit an already-present key
    #[error("item already exists for key: {0}")]
    Conflict(String),

    /// Malformed input, rejected before touching cache state
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Conflict(_) => StatusCode::CONFLICT,
            CacheError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
