use std::fmt;

use thiserror::Error;

/// Failure taxonomy of the synchronization layer.
///
/// The `Display` output is what ends up in `EntityState::error_message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Malformed or missing argument, detected before any request is sent.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The request never produced a usable response.
    #[error("{kind}: {message}")]
    TransportFailure {
        kind: TransportFailureKind,
        message: String,
    },
    /// The server answered with a non-2xx status.
    #[error("server rejected request ({status}): {message}")]
    ServerRejection { status: u16, message: String },
}

impl SyncError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn transport(kind: TransportFailureKind, message: impl Into<String>) -> Self {
        Self::TransportFailure {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailureKind {
    Timeout,
    Connect,
    Network,
    Decode,
}

impl fmt::Display for TransportFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailureKind::Timeout => write!(f, "timeout"),
            TransportFailureKind::Connect => write!(f, "connection failed"),
            TransportFailureKind::Network => write!(f, "network error"),
            TransportFailureKind::Decode => write!(f, "malformed response"),
        }
    }
}
