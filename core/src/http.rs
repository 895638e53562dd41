//! HTTP transport types and the transport seam.
//!
//! # Design
//! Requests and responses are described as plain data. The client builds
//! `HttpRequest` values and interprets `HttpResponse` values; the actual
//! round-trip happens behind the [`HttpTransport`] trait, so tests can swap
//! in counting or failing transports without a server. The transport never
//! interprets status codes — 4xx/5xx responses come back as data and the
//! client decides what they mean.
//!
//! All fields use owned types (`String`, `Vec`) so values can be moved into
//! the transport and across task boundaries without lifetime concerns.

use async_trait::async_trait;

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

/// Request payload variants. JSON carries the already-serialized body;
/// multipart carries the form as data and is encoded by the transport.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(String),
    Multipart(MultipartForm),
}

/// A multipart/form-data body: one file part plus any number of plain text
/// fields, mirroring what the backend's upload endpoints accept.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    pub file: FilePart,
    pub texts: Vec<(String, String)>,
}

/// The file part of a multipart form.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Form field name (the backend expects `file`).
    pub name: String,
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one HTTP round-trip.
///
/// Implementations return `Err` only for transport-level failures (connect
/// refused, DNS, interrupted body). Any response the server actually sent —
/// including 4xx/5xx — is returned as an `HttpResponse`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}
