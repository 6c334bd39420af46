//! Centralized Error Handling Module
//!
//! Every failure that reaches a caller carries a unique error code.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - API_xxx: API errors
//! - STORAGE_xxx: cache database errors
//! - PROVIDER_xxx: explorer API errors
//! - CFG_xxx: Configuration errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;
use tracing::error;

use crate::api::types::{ApiError, ApiResponse};

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // API Errors
    // ============================================
    /// Invalid request format
    ApiBadRequest,
    /// Missing or wrong admin API key
    ApiUnauthorized,
    /// Endpoint disabled by configuration
    ApiForbidden,
    /// Internal server error
    ApiInternalError,

    // ============================================
    // Storage Errors
    // ============================================
    /// Cache database could not be opened or queried
    StorageError,
    /// Snapshot could not be encoded/decoded for the cache table
    StorageCodec,

    // ============================================
    // Provider Errors
    // ============================================
    /// Explorer returned non-200
    ProviderHttpStatus,
    /// Explorer body did not have the expected shape
    ProviderInvalidResponse,
    /// Explorer request timed out
    ProviderTimeout,
    /// Explorer connection failed
    ProviderConnectionFailed,

    // ============================================
    // Configuration Errors
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,

    // ============================================
    // Generic Errors
    // ============================================
    /// Unknown error
    Unknown,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiUnauthorized => "API_UNAUTHORIZED",
            Self::ApiForbidden => "API_FORBIDDEN",
            Self::ApiInternalError => "API_INTERNAL_ERROR",

            Self::StorageError => "STORAGE_ERROR",
            Self::StorageCodec => "STORAGE_CODEC",

            Self::ProviderHttpStatus => "PROVIDER_HTTP_STATUS",
            Self::ProviderInvalidResponse => "PROVIDER_INVALID_RESPONSE",
            Self::ProviderTimeout => "PROVIDER_TIMEOUT",
            Self::ProviderConnectionFailed => "PROVIDER_CONNECTION_FAILED",

            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",

            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ApiBadRequest | Self::ConfigInvalidValue => 400,
            Self::ApiUnauthorized => 401,
            Self::ApiForbidden => 403,
            Self::ProviderTimeout => 504,
            Self::ProviderHttpStatus
            | Self::ProviderInvalidResponse
            | Self::ProviderConnectionFailed => 502,
            _ => 500,
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// API bad request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }

    /// Missing or invalid admin key
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::ApiUnauthorized, "Invalid or missing API key")
    }

    /// Admin endpoint disabled (no key configured)
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiForbidden, msg)
    }

    /// Invalid configuration value
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        Self::with_source(ErrorCode::StorageError, "Cache database error", err)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::with_source(ErrorCode::ApiInternalError, "Blocking task failed", err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(ErrorCode::ProviderTimeout, "Request timeout")
        } else if err.is_connect() {
            Self::new(ErrorCode::ProviderConnectionFailed, "Connection failed")
        } else if err.is_decode() {
            Self::new(ErrorCode::ProviderInvalidResponse, err.to_string())
        } else {
            Self::new(ErrorCode::Unknown, err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::StorageCodec, "JSON encode/decode error", err)
    }
}

// ============================================
// Axum integration
// ============================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            match &self.source {
                Some(source) => error!(code = self.code_str(), "{}: {}", self.message, source),
                None => error!(code = self.code_str(), "{}", self.message),
            }
        }

        let body = ApiResponse::error(ApiError::new(self.code_str(), self.message));
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::new(ErrorCode::StorageError, "disk full");
        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(err.code_str(), "STORAGE_ERROR");
        assert_eq!(err.to_string(), "[STORAGE_ERROR] disk full");
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorCode::ApiBadRequest.http_status(), 400);
        assert_eq!(ErrorCode::ApiUnauthorized.http_status(), 401);
        assert_eq!(ErrorCode::ApiForbidden.http_status(), 403);
        assert_eq!(ErrorCode::StorageError.http_status(), 500);
        assert_eq!(ErrorCode::ProviderTimeout.http_status(), 504);
    }

    #[test]
    fn test_rusqlite_conversion_keeps_source() {
        let err: AppError = rusqlite::Error::InvalidQuery.into();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::unauthorized().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = AppError::new(ErrorCode::StorageError, "unreachable").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::bad_request("Invalid registry payload").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
