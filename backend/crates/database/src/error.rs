//! Database Error Types

use kernel::error::app_error::AppError;
use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// The handle's transaction was already committed or rolled back
    #[error("Transaction already finished")]
    TransactionFinished,

    /// `begin` on a handle that is already inside a transaction
    #[error("A transaction is already open on this handle")]
    NestedTransaction,

    /// `commit`/`rollback` on a pooled handle
    #[error("No transaction is open on this handle")]
    NoTransaction,
}

impl DbError {
    /// SQLSTATE 23505
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DbError::Sqlx(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
            _ => false,
        }
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(e) => AppError::from(e),
            other => AppError::internal("Database error").with_source(other),
        }
    }
}
