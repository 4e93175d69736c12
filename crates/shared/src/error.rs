use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body the backend attaches to a refused request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The only failure kind a remote call can produce from the client's view.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("failed to reach the wall backend: {0}")]
    Network(String),
    #[error("{message}")]
    Rejected { message: String },
    #[error("invalid wall backend payload: {0}")]
    InvalidPayload(String),
}

impl From<ApiError> for TransportError {
    fn from(value: ApiError) -> Self {
        Self::Rejected {
            message: value.message,
        }
    }
}
