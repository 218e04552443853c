//! Catalog Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-specific error variants
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Category not found
    #[error("Category not found")]
    CategoryNotFound,

    /// Genre not found
    #[error("Genre not found")]
    GenreNotFound,

    /// Title not found
    #[error("Title not found")]
    TitleNotFound,

    /// Review not found
    #[error("Review not found")]
    ReviewNotFound,

    /// Comment not found
    #[error("Comment not found")]
    CommentNotFound,

    /// Slug already belongs to another category or genre
    #[error("Slug already in use")]
    SlugTaken,

    /// The author already reviewed this title
    #[error("Author already reviewed this title")]
    DuplicateReview,

    /// Malformed or out-of-range input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Missing or invalid bearer token
    #[error("Authentication required")]
    Unauthorized,

    /// Valid caller, insufficient role or ownership
    #[error("Insufficient permissions")]
    Forbidden,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::CategoryNotFound
            | CatalogError::GenreNotFound
            | CatalogError::TitleNotFound
            | CatalogError::ReviewNotFound
            | CatalogError::CommentNotFound => ErrorKind::NotFound,
            CatalogError::SlugTaken | CatalogError::DuplicateReview => ErrorKind::Conflict,
            CatalogError::Validation(_) => ErrorKind::BadRequest,
            CatalogError::Unauthorized => ErrorKind::Unauthorized,
            CatalogError::Forbidden => ErrorKind::Forbidden,
            CatalogError::Database(_) | CatalogError::Internal(_) => {
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
            CatalogError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<auth::Deny> for CatalogError {
    fn from(deny: auth::Deny) -> Self {
        match deny {
            auth::Deny::Unauthorized => CatalogError::Unauthorized,
            auth::Deny::Forbidden => CatalogError::Forbidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_error_status_codes() {
        let cases: Vec<(CatalogError, StatusCode)> = vec![
            (CatalogError::TitleNotFound, StatusCode::NOT_FOUND),
            (CatalogError::SlugTaken, StatusCode::CONFLICT),
            (CatalogError::DuplicateReview, StatusCode::CONFLICT),
            (
                CatalogError::Validation("score out of range".into()),
                StatusCode::BAD_REQUEST,
            ),
            (CatalogError::Unauthorized, StatusCode::UNAUTHORIZED),
            (CatalogError::Forbidden, StatusCode::FORBIDDEN),
        ];

        for (error, expected) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
