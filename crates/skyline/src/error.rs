//! Error types for the skyline client.
//!
//! Every failure is surfaced to the direct caller as one [`Error`]; nothing is
//! retried or swallowed inside the client.

use std::fmt;
use thiserror::Error;

use crate::xrpc::XrpcErrorResponse;

/// The unified error type for skyline operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with a non-2xx status.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// An operation that needs a session was called on an anonymous client.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// A resource did not have the shape an operation needs.
    #[error("type error: {0}")]
    Type(#[from] TypeError),

    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A request body that could not be encoded, or a successful response
    /// whose body is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input validation errors (service URL, AT URI).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// A non-2xx response, with the status and body exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
    /// XRPC error code, when the body carries one.
    pub error: Option<String>,
    /// XRPC error message, when the body carries one.
    pub message: Option<String>,
}

impl HttpError {
    /// Build an error from a status and raw body, picking up the XRPC
    /// `error`/`message` fields if the body is an XRPC error document.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let (error, message) = match serde_json::from_str::<XrpcErrorResponse>(&body) {
            Ok(parsed) => (parsed.error, parsed.message),
            Err(_) => (None, None),
        };

        Self {
            status,
            body,
            error,
            message,
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        match self.message {
            Some(ref message) => write!(f, ": {}", message)?,
            None if !self.body.is_empty() => write!(f, ": {}", self.body)?,
            None => {}
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The client has no session.
    #[error("client is not authenticated")]
    NotAuthenticated,
}

/// Shape errors raised when a resource lacks what an operation reads from it.
#[derive(Debug, Error)]
pub enum TypeError {
    /// A JSON object was required.
    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// A required field is absent.
    #[error("missing field `{field}`")]
    MissingField { field: String },

    /// A field is present but holds the wrong kind of value.
    #[error("field `{field}` must be {expected}")]
    WrongFieldType {
        field: String,
        expected: &'static str,
    },
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

    /// Any other failure from the HTTP layer.
    #[error("HTTP transport error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid service URL.
    #[error("invalid service URL '{value}': {reason}")]
    ServiceUrl { value: String, reason: String },

    /// Invalid AT URI format.
    #[error("invalid AT URI '{value}': {reason}")]
    AtUri { value: String, reason: String },
}
