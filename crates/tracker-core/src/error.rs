//! Error taxonomy
//!
//! Validation errors are caught before any remote call. Store errors come
//! back from the remote collaborator and are split by whether the server
//! answered (`Remote`), the request never completed (`Network`), or the
//! response had an unexpected shape (`Decode`).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("REMOTE ({status}): {message}")]
    Remote { status: u16, message: String },
    #[error("NETWORK: {0}")]
    Network(String),
    #[error("DECODE: {0}")]
    Decode(String),
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
}

impl StoreError {
    /// Transport-level failures get a generic message instead of the
    /// operation-specific one.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, StoreError::Network(_))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Network(value.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The confirmation step was declined; nothing was sent.
    #[error("cancelled")]
    Cancelled,
}

pub type TrackerResult<T> = Result<T, TrackerError>;
