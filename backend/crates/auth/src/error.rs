//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use database::DbError;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::validation::ValidationErrors;
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Field → messages map
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Unknown email address or wrong password; the two are never distinguished
    #[error("Invalid email address or password")]
    InvalidCredentials,

    /// Missing cookie, unknown session or missing principal
    #[error("Unauthorized")]
    Unauthorized,

    /// Unique constraint violation; carries the constraint name
    #[error("Conflict: {0}")]
    Conflict(String),

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
            AuthError::Validation(_) => ErrorKind::UnprocessableEntity,
            AuthError::InvalidCredentials | AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::Conflict(_) => ErrorKind::Conflict,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Single-field validation error
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, message);
        AuthError::Validation(errors)
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Validation(errors) => AppError::validation(errors),
            AuthError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log client-side failures; server errors are logged by the envelope
    fn log(&self) {
        match self {
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid sign-in attempt");
            }
            AuthError::Unauthorized => {
                tracing::debug!("Unauthenticated request rejected");
            }
            AuthError::Validation(errors) => {
                tracing::debug!(errors = %errors, "Validation failed");
            }
            AuthError::Conflict(constraint) => {
                tracing::debug!(constraint = %constraint, "Unique constraint violated");
            }
            AuthError::Database(_) | AuthError::Internal(_) => {}
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<DbError> for AuthError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(e) => AuthError::Database(e),
            other => AuthError::Internal(other.to_string()),
        }
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<ValidationErrors> for AuthError {
    fn from(errors: ValidationErrors) -> Self {
        AuthError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::InvalidCredentials.into_app_error().status_code(), 401);
        assert_eq!(AuthError::Unauthorized.into_app_error().status_code(), 401);
        assert_eq!(AuthError::field("emailAddress", "taken").into_app_error().status_code(), 422);
        assert_eq!(AuthError::Conflict("x".into()).into_app_error().status_code(), 409);
        assert_eq!(AuthError::Internal("boom".into()).into_app_error().status_code(), 500);
    }

    #[test]
    fn test_validation_keeps_params() {
        let app = AuthError::field("password", "password is required").into_app_error();
        assert_eq!(
            app.params().and_then(|p| p.get("password")),
            Some(&["password is required".to_string()][..])
        );
    }

    #[test]
    fn test_db_error_conversion() {
        assert!(matches!(
            AuthError::from(DbError::TransactionFinished),
            AuthError::Internal(_)
        ));
        assert!(matches!(
            AuthError::from(DbError::Sqlx(sqlx::Error::RowNotFound)),
            AuthError::Database(_)
        ));
    }
}
