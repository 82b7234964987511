//! Errors surfaced by the API clients.

use thiserror::Error;

use crate::domain::errors::DecodeError;
use crate::ports::{TransportError, WriteError};

/// Error returned by every client operation.
#[derive(Debug, Error)]
pub enum RecastError {
    /// Neither the request nor the client carries a token.
    #[error("token is not set")]
    TokenNotSet,

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API answered with a non-success status.
    #[error(
        "request rejected with status {status}: {}",
        .message.as_deref().unwrap_or("no message")
    )]
    Rejected {
        status: u16,
        /// The `message` field of the reply body, when it has one.
        message: Option<String>,
    },

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An outbound call was asked to send an empty message list.
    #[error("no messages to send")]
    NoMessages,
}

impl RecastError {
    /// Creates a rejection error.
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        Self::Rejected { status, message }
    }

    /// Returns true for failures caused by local configuration rather than the remote side.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::TokenNotSet)
    }
}

impl From<RecastError> for WriteError {
    fn from(err: RecastError) -> Self {
        match err {
            RecastError::NoMessages => WriteError::NoMessages,
            RecastError::TokenNotSet => WriteError::NotAuthorized,
            RecastError::Rejected { status, message } => WriteError::Rejected { status, message },
            RecastError::Transport(err) => WriteError::Transport(err),
            other => WriteError::Other(other.to_string()),
        }
    }
}
