//! Error types for the Books API client.
//!
//! # Design
//! Everything that can go wrong between issuing a request and holding a typed
//! record is an `ApiError`. The session treats every variant the same way (a
//! transport failure); the split exists for logging and for callers that do
//! a direct lookup and want to tell "no such book" apart from the rest.
//!
//! `TransportError` is what a `Transport` implementation reports when no HTTP
//! response arrived at all.

use thiserror::Error;

/// The request never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No response within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// DNS, connect, TLS or I/O failure.
    #[error("connection failed: {0}")]
    Connection(String),
}

/// Errors returned by `BookClient` parse methods and by transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404; the requested book does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
