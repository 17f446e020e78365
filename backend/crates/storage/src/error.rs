//! Storage Error Types

use database::DbError;
use kernel::error::app_error::AppError;
use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Credentials, region or bucket could not be set up
    #[error("Storage configuration error: {0}")]
    Config(String),

    /// The object store rejected or failed a request
    #[error("Storage request failed for '{key}': {message}")]
    Request { key: String, message: String },

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl StorageError {
    pub(crate) fn request(key: &str, err: impl std::fmt::Display) -> Self {
        StorageError::Request {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::Database(DbError::Sqlx(err))
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => AppError::not_found(format!("Object not found: {}", key)),
            StorageError::Database(e) => AppError::from(e),
            other => AppError::internal("Object storage error").with_source(other),
        }
    }
}
