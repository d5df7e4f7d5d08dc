//! Error types for the employee API client.
//!
//! # Design
//! Every failed call is a `RequestFailure`. The variants keep transport
//! failures (no response at all) apart from application failures (a non-2xx
//! status), but both expose the same `{status_code, message}` shape through
//! `status_code()` and `message()`.

use thiserror::Error;

/// Error raised by a `Transport` when no HTTP response was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors returned by the gateway and the typed employee operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestFailure {
    /// The request never produced a response (server unreachable, DNS, I/O).
    #[error("transport failure: {message}")]
    Transport { message: String },

    /// The server answered with a status outside 200..=299.
    #[error("HTTP {status_code}: {message}")]
    Status { status_code: u16, message: String },

    /// The request body could not be serialized to JSON.
    #[error("failed to encode request body: {message}")]
    Encode { message: String },

    /// A success response did not have the expected shape.
    #[error("unexpected response body: {message}")]
    Decode { message: String },
}

impl RequestFailure {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RequestFailure::Status { status_code, .. } => Some(*status_code),
            RequestFailure::Transport { .. } | RequestFailure::Encode { .. } | RequestFailure::Decode { .. } => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            RequestFailure::Transport { message }
            | RequestFailure::Status { message, .. }
            | RequestFailure::Encode { message }
            | RequestFailure::Decode { message } => message,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, RequestFailure::Transport { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RequestFailure::Status { status_code: 404, .. })
    }
}

impl From<TransportError> for RequestFailure {
    fn from(err: TransportError) -> Self {
        RequestFailure::Transport { message: err.0 }
    }
}
