//! Error types for the items crates.
//!
//! A single closed taxonomy: store failures (transport and protocol) are
//! server-side problems, while token, limit and input failures are the
//! caller's fault and are reported back as client errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for item store and pagination operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The store could not be reached or failed mid-operation.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A remote store answered with an error status.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Malformed item, item id or store URL.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// A pagination token that does not decode to a resume key.
    #[error("invalid page token: {0}")]
    InvalidToken(#[from] InvalidTokenError),

    /// A page size outside the accepted range.
    #[error("invalid limit: {0}")]
    InvalidLimit(#[from] InvalidLimitError),
}

impl Error {
    /// Returns true if the error was caused by the caller's input rather
    /// than by the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_) | Error::InvalidToken(_) | Error::InvalidLimit(_)
        )
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// Local filesystem error.
    #[error("IO error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// An error status returned by a remote items API.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// The `detail` field of the error body, if present.
    pub detail: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref detail) = self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, detail: Option<String>) -> Self {
        Self { status, detail }
    }

    /// Check if the remote reported a missing resource.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid item id.
    #[error("invalid item id '{value}': {reason}")]
    ItemId { value: String, reason: String },

    /// Invalid item body.
    #[error("invalid item: {reason}")]
    Item { reason: String },

    /// Invalid store URL.
    #[error("invalid store URL '{value}': {reason}")]
    StoreUrl { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

/// Reasons a page token was rejected.
#[derive(Debug, Error)]
pub enum InvalidTokenError {
    /// Not valid unpadded base64url.
    #[error("bad encoding: {reason}")]
    Encoding { reason: String },

    /// Decoded bytes are not a JSON object.
    #[error("bad payload: {reason}")]
    Payload { reason: String },

    /// Decoded object is not a usable resume key.
    #[error("bad resume key: {reason}")]
    Key { reason: String },

    /// Token decodes but is not in canonical form.
    #[error("token is not in canonical form")]
    NonCanonical,
}

/// A page size outside `[PageLimit::MIN, PageLimit::MAX]`.
#[derive(Debug, Error)]
#[error("page size '{value}' must be an integer between 1 and 100")]
pub struct InvalidLimitError {
    /// The rejected value, as supplied.
    pub value: String,
}
