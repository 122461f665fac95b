use std::fmt;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    /// Poll interval elapsed.
    Tick,
    /// A feed request finished, successfully decoded or not.
    Completed { result: Result<Value, FetchError> },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    InvalidJson,
    Network,
    /// The poller could not start or has stopped.
    Runtime,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::InvalidJson => write!(f, "invalid json"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Runtime => write!(f, "poller runtime unavailable"),
        }
    }
}
