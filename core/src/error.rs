//! Error types for the posts API client.
//!
//! # Design
//! Every failure is a pass-through of what went wrong underneath: the
//! server's status and body, the decoder's message, or the transport's
//! message. Nothing is retried or swallowed.

use thiserror::Error;

/// Errors returned by `PostClient` parse methods and by transports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be decoded, or a `createdAt` value
    /// could not be read as a timestamp.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response (connect, DNS, I/O, timeout).
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
