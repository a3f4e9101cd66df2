use reqwest::StatusCode;
use thiserror::Error;
use worklog_engine::FormError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{message} ({status})")]
    Api {
        status: StatusCode,
        message: String,
        code: Option<String>,
    },
    #[error("Request rejected: {0}")]
    Rejected(String),
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error(transparent)]
    Validation(#[from] FormError),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Api { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}
