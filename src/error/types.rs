//! API Error Types
//!
//! This module defines the error type returned by HTTP handlers. Each
//! variant maps to one HTTP status code and a short machine-readable
//! category string; conversion lives in `error::conversion`.

use axum::http::StatusCode;
use thiserror::Error;

/// Error type for all API operations
///
/// Every denial and failure in the request path is expressed as one of
/// these variants. Handlers return `Result<_, ApiError>` and rely on the
/// `IntoResponse` implementation for the wire format.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Authenticated actor is not allowed to perform the operation
    #[error("{0}")]
    Forbidden(String),

    /// Request payload failed validation
    #[error("{0}")]
    InvalidInput(String),

    /// Missing or invalid credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Persistence collaborator failed
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),

    /// Non-storage internal failure (password hashing, token signing)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Create a new not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a new forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Create a new invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a new unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the machine-readable category for this error
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Forbidden(_) => "forbidden",
            Self::InvalidInput(_) => "invalid_input",
            Self::Unauthorized(_) => "unauthorized",
            Self::Storage(_) | Self::Internal(_) => "internal",
        }
    }

    /// Get the message safe to expose to clients
    ///
    /// Storage errors carry driver detail that must never reach the
    /// response body; they collapse to a generic message here.
    pub fn public_message(&self) -> String {
        match self {
            Self::Storage(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::NotFound(message)
            | Self::Forbidden(message)
            | Self::InvalidInput(message)
            | Self::Unauthorized(message) => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::not_found("Checklist not found").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::forbidden("Insufficient permissions").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::invalid_input("Checklist title is required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::unauthorized("Authentication required").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Storage(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(ApiError::not_found("x").category(), "not_found");
        assert_eq!(ApiError::forbidden("x").category(), "forbidden");
        assert_eq!(ApiError::invalid_input("x").category(), "invalid_input");
        assert_eq!(ApiError::unauthorized("x").category(), "unauthorized");
    }

    #[test]
    fn test_storage_errors_do_not_leak() {
        let error = ApiError::Storage(sqlx::Error::PoolTimedOut);
        assert_eq!(error.public_message(), "Internal server error");
    }
}
