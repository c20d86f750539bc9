use thiserror::Error;

use crate::forms::FormError;

/// Failures surfaced by the service layer to the routes.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Form(String),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),

    #[error("not found")]
    NotFound,

    /// The backend refused the operation; its notices were already raised.
    #[error("{0}")]
    Rejected(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}
