//! Unified error handling
//!
//! Provides the application-level error type and response envelope:
//! - [`AppError`] - domain error enum
//! - [`AppResponse`] - API response structure
//!
//! # Error code ranges
//!
//! | Prefix | Category | Example |
//! |--------|----------|---------|
//! | E0xxx  | General  | E0002 validation failed |
//! | E2xxx  | Permission | E2001 forbidden |
//! | E9xxx  | System   | E9002 database error |
//!
//! # Example
//!
//! ```ignore
//! // Return an error
//! Err(AppError::not_found("Restaurant abc"))
//!
//! // Return a success response
//! Ok(ok(data))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Unified API response structure
///
/// ```json
/// {
///   "code": "E0000",
///   "message": "Success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code ("E0000" means success)
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Response payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error enum
///
/// Domain taxonomy (not transport codes): `NotFound` for missing referenced
/// entities, `Validation` for business rule violations and illegal lifecycle
/// transitions, `Conflict` for uniqueness violations, `Forbidden` for
/// authorization failures. `Database`/`Internal` are system errors whose
/// details are logged but not exposed to clients.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Business errors (4xx) ==========
    #[error("Resource not found: {0}")]
    /// Referenced entity missing (404)
    NotFound(String),

    #[error("Validation failed: {0}")]
    /// Rule violation, message is customer-displayable (400)
    Validation(String),

    #[error("Resource already exists: {0}")]
    /// Uniqueness violation (409)
    Conflict(String),

    #[error("Permission denied: {0}")]
    /// Authorization failure (403)
    Forbidden(String),

    // ========== System errors (5xx) ==========
    #[error("Database error: {0}")]
    /// Database failure (500)
    Database(String),

    #[error("Internal server error: {0}")]
    /// Internal failure (500)
    Internal(String),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// The inner human-readable message, without the category prefix
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::Conflict(msg)
            | Self::Forbidden(msg)
            | Self::Database(msg)
            | Self::Internal(msg) => msg,
        }
    }

    /// Stable string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E0003",
            Self::Validation(_) => "E0002",
            Self::Conflict(_) => "E0004",
            Self::Forbidden(_) => "E2001",
            Self::Database(_) => "E9002",
            Self::Internal(_) => "E9001",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.as_str()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.as_str()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.as_str()),

            // System errors: log details, hide them from the client
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message: message.to_string(),
            data: None,
        });

        (status, body).into_response()
    }
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: "Success".to_string(),
        data: Some(data),
    })
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: message.into(),
        data: Some(data),
    })
}
