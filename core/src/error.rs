//! Error types for the bookstore API client.
//!
//! # Design
//! `MissingToken` and `Unauthorized` get dedicated variants because callers
//! branch on them: the first means the request was never sent, the second
//! means the session was torn down by a 401. A response envelope with
//! `success:false` lands in `Rejected` with the backend's message. All other
//! non-2xx responses land in `HttpError` with the raw status code and body
//! for debugging.

use std::fmt;

/// Errors returned by `BookstoreClient` operations.
#[derive(Debug)]
pub enum ApiError {
    /// An authenticated endpoint was called with no token stored. The
    /// request was not sent.
    MissingToken,

    /// The server returned 401 — the local session has been cleared.
    Unauthorized,

    /// The request never produced a response (connect failure, DNS, ...).
    NetworkError(String),

    /// The server returned a non-2xx status other than 401.
    HttpError { status: u16, body: String },

    /// The server answered 2xx but the response envelope carried
    /// `success:false` (or no data); holds the envelope's message.
    Rejected(String),

    /// The file failed client-side validation. The request was not sent.
    ValidationError(String),

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingToken => write!(f, "no authentication token found"),
            ApiError::Unauthorized => write!(f, "unauthorized"),
            ApiError::NetworkError(msg) => write!(f, "network error: {msg}"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::Rejected(msg) => write!(f, "request rejected: {msg}"),
            ApiError::ValidationError(msg) => write!(f, "{msg}"),
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
