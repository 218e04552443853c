//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Username already belongs to a different user
    #[error("Username already in use")]
    UsernameTaken,

    /// Email already belongs to a different user
    #[error("Email already in use")]
    EmailTaken,

    /// Wrong, expired, or missing confirmation code.
    /// Deliberately 400-class, not 401: a bad code is distinct from a
    /// bad bearer token.
    #[error("Invalid confirmation code")]
    InvalidCredentials,

    /// Malformed or out-of-range input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Missing or invalid bearer token
    #[error("Authentication required")]
    Unauthorized,

    /// Valid caller, insufficient role or ownership
    #[error("Insufficient permissions")]
    Forbidden,

    /// Outbound mail delivery failed
    #[error("Mail delivery failed: {0}")]
    Mail(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UsernameTaken | AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::Mail(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError.
    ///
    /// Database errors go through the kernel sqlx mapping so that
    /// unique-constraint violations surface as Conflict, not 500.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Mail(msg) => {
                tracing::error!(message = %msg, "Outbound mail failure");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Confirmation code mismatch");
            }
            AuthError::Unauthorized => {
                tracing::debug!("Request without valid bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest | ErrorKind::UnprocessableEntity => {
                AuthError::Validation(err.message().to_string())
            }
            ErrorKind::NotFound => AuthError::UserNotFound,
            ErrorKind::Unauthorized => AuthError::Unauthorized,
            ErrorKind::Forbidden => AuthError::Forbidden,
            _ => AuthError::Internal(err.to_string()),
        }
    }
}
