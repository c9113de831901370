use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod categories;
pub mod communications;
pub mod customers;
pub mod offers;
pub mod products;
pub mod users;

/// Result type returned by the service layer.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures surfaced to the HTTP layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The request payload or query failed validation.
    #[error("{0}")]
    Form(String),
    #[error("resource not found")]
    NotFound,
    /// The write collides with existing data.
    #[error("{0}")]
    Conflict(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Conflict(message) => ServiceError::Conflict(message),
            RepositoryError::Validation(message) => ServiceError::Form(message),
            RepositoryError::Unknown(message) => ServiceError::Internal(message),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_errors_map_to_service_errors() {
        assert_eq!(
            ServiceError::from(RepositoryError::NotFound),
            ServiceError::NotFound
        );
        assert_eq!(
            ServiceError::from(RepositoryError::Conflict("taken".into())),
            ServiceError::Conflict("taken".into())
        );
        assert_eq!(
            ServiceError::from(RepositoryError::Validation("bad".into())),
            ServiceError::Form("bad".into())
        );
        assert_eq!(
            ServiceError::from(RepositoryError::Unknown("disk".into())),
            ServiceError::Internal("disk".into())
        );
    }

    #[test]
    fn form_errors_become_form_failures() {
        let err = ServiceError::from(FormError::EmptyField("name"));
        assert_eq!(err, ServiceError::Form("name cannot be empty".into()));
    }
}
