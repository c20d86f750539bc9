use thiserror::Error;

use crate::remote::errors::ClientError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Remote client error: {0}")]
    Client(#[from] ClientError),

    /// The backend answered `success: false`.
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Decode(err.to_string())
    }
}
