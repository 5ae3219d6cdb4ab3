//! Errors raised by admin API operations.

use db::DbError;
use school_core::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input rejected before touching the store.
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Store(#[from] DbError),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// HTTP-style status code reported in the error envelope.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::Conflict(_) => 409,
            ServiceError::Store(DbError::NotFound(_)) => 404,
            ServiceError::Store(DbError::Conflict(_)) => 409,
            ServiceError::Store(_) => 500,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::new(err.to_string(), err.status())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Fail with a validation error when a required text field is blank.
pub(crate) fn require(value: &str, message: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        Err(ServiceError::validation(message))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(ServiceError::validation("Name is required").status(), 400);
        assert_eq!(ServiceError::not_found("School").status(), 404);
        assert_eq!(ServiceError::conflict("Email already in use").status(), 409);
        assert_eq!(ServiceError::from(DbError::NotInitialized).status(), 500);
        assert_eq!(ServiceError::from(DbError::Conflict("x".into())).status(), 409);
    }

    #[test]
    fn converts_into_api_error() {
        let err: ApiError = ServiceError::validation("Name is required").into();
        assert_eq!(err.status, 400);
        assert_eq!(err.error, "Name is required");
        assert!(err.is_validation());

        let err: ApiError = ServiceError::not_found("School").into();
        assert_eq!(err.error, "School not found");
    }
}
