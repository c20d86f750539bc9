use thiserror::Error;

/// Failure to obtain an envelope from the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

#[cfg(feature = "server")]
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
