//! Default [`HttpTransport`] implementation backed by `reqwest`.
//!
//! One `reqwest::Client` is held for the lifetime of the transport so
//! connections are pooled across requests. No timeout is configured here —
//! the layer inherits whatever `reqwest` defaults to — and there is no
//! retry or cancellation support.

use async_trait::async_trait;
use reqwest::multipart;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBody};

/// `reqwest`-backed transport used by [`crate::BookstoreClient`] unless a
/// custom transport is injected.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(json) => builder
                .header("Content-Type", "application/json")
                .body(json),
            RequestBody::Multipart(form) => {
                let part = multipart::Part::bytes(form.file.data)
                    .file_name(form.file.file_name)
                    .mime_str(&form.file.content_type)
                    .map_err(|e| {
                        ApiError::ValidationError(format!("invalid content type: {e}"))
                    })?;
                let mut multipart = multipart::Form::new().part(form.file.name, part);
                for (name, value) in form.texts {
                    multipart = multipart.text(name, value);
                }
                builder.multipart(multipart)
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
