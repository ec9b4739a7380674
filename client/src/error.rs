//! Error types for the todo API client.
//!
//! `NotFound` and `BadRequest` get dedicated variants because callers act on
//! them; `BadRequest` carries the server's `error` message verbatim so it can
//! be matched ("Title is required", "Priority must be 1, 2, or 3"). Any other
//! unexpected status lands in `HttpError` with the raw body.

use thiserror::Error;

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server rejected the request payload with 400.
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}
