//! Error conversion glue between the domain and the outer layers.
//!
//! The domain layer must not depend on service or repository error types, so
//! the conversions live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;
#[cfg(feature = "server")]
use crate::services::ServiceError;

#[cfg(feature = "server")]
impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::Decode(val.to_string())
    }
}
