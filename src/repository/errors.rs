use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Result container returned by every repository operation.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Closed set of failures a repository call can report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// The addressed row, or a row it should be connected to, does not exist.
    #[error("record not found")]
    NotFound,
    /// A unique or referential constraint blocked the write.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Malformed data reached the persistence layer.
    #[error("validation error: {0}")]
    Validation(String),
    /// Any other persistence failure.
    #[error("unknown repository error: {0}")]
    Unknown(String),
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(kind, info) => {
                let message = info.message().to_string();
                match kind {
                    DatabaseErrorKind::UniqueViolation
                    | DatabaseErrorKind::ForeignKeyViolation => Self::Conflict(message),
                    DatabaseErrorKind::NotNullViolation | DatabaseErrorKind::CheckViolation => {
                        Self::Validation(message)
                    }
                    _ => Self::Unknown(message),
                }
            }
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for RepositoryError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Self::Unknown(err.to_string())
    }
}
