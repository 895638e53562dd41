//! Client handle and the one request-executing path everything goes through.
//!
//! # Design
//! `BookstoreClient` holds the base URL, the transport, and the injected
//! [`Session`]; it is a cheap `Arc` handle. Resource modules build an
//! `HttpRequest` and hand it to either the public send (no token, status
//! returned as data) or [`BookstoreClient::authenticated_request`], which
//! owns the whole bearer-token contract: fail fast with no token, inject
//! the header, and tear the session down on a 401. The 401 branch lives
//! here and nowhere else.
//!
//! Response interpretation is split into small parse helpers so each
//! endpoint picks the shape the backend actually serves: the
//! `{success, data, message}` envelope, an envelope ack with no data, or a
//! bare JSON document.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBody};
use crate::session::Session;
use crate::transport::ReqwestTransport;
use crate::types::ApiResponse;

/// Origin the storefront backend listens on unless overridden.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Typed client for the bookstore REST backend.
#[derive(Clone)]
pub struct BookstoreClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base_url: String,
    http: Arc<dyn HttpTransport>,
    session: Session,
}

impl BookstoreClient {
    /// Client against [`DEFAULT_BASE_URL`] with the reqwest transport.
    pub fn new(session: Session) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, session)
    }

    pub fn with_base_url(base_url: &str, session: Session) -> Self {
        Self::with_transport(base_url, Arc::new(ReqwestTransport::new()), session)
    }

    /// Client with a custom transport. Tests use this to interpose
    /// counting or failing transports.
    pub fn with_transport(
        base_url: &str,
        http: Arc<dyn HttpTransport>,
        session: Session,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                base_url: base_url.trim_end_matches('/').to_string(),
                http,
                session,
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    pub(crate) fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.inner.base_url),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Execute without touching the session. Non-2xx comes back as data.
    pub(crate) async fn send_public(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, ApiError> {
        self.inner.http.execute(request).await
    }

    /// Execute with the bearer token contract.
    ///
    /// Fails with [`ApiError::MissingToken`] before any network attempt
    /// when no non-empty token is stored. A 401 response triggers
    /// [`BookstoreClient::logout`] — best-effort server notify plus
    /// unconditional local teardown — and surfaces as
    /// [`ApiError::Unauthorized`]. Every other status, 4xx/5xx included,
    /// is returned unmodified; interpretation is the caller's job.
    pub async fn authenticated_request(
        &self,
        mut request: HttpRequest,
    ) -> Result<HttpResponse, ApiError> {
        let token = self
            .inner
            .session
            .token()
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::MissingToken)?;
        request
            .headers
            .push(("Authorization".to_string(), format!("Bearer {token}")));

        let response = self.inner.http.execute(request).await?;
        if response.status == 401 {
            self.logout().await;
            return Err(ApiError::Unauthorized);
        }
        Ok(response)
    }
}

/// Map non-2xx status codes to `HttpError` with the raw body preserved.
pub(crate) fn ensure_success(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Unwrap a `{success, data, message}` envelope into its data.
///
/// `success:true` without data is a rejection too — callers of these
/// endpoints always expect a payload.
pub(crate) fn parse_envelope<T: DeserializeOwned>(
    response: HttpResponse,
) -> Result<T, ApiError> {
    ensure_success(&response)?;
    let envelope: ApiResponse<T> = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
    match envelope {
        ApiResponse {
            success: true,
            data: Some(data),
            ..
        } => Ok(data),
        ApiResponse { message, .. } => Err(ApiError::Rejected(message)),
    }
}

/// Unwrap an envelope that carries no data, only the success flag.
pub(crate) fn parse_ack(response: HttpResponse) -> Result<(), ApiError> {
    ensure_success(&response)?;
    let envelope: ApiResponse<serde_json::Value> = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
    if envelope.success {
        Ok(())
    } else {
        Err(ApiError::Rejected(envelope.message))
    }
}

/// Parse a bare JSON document (the endpoints the backend serves without
/// the envelope: current user, dashboard overview, generic upload).
pub(crate) fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    ensure_success(&response)?;
    serde_json::from_str(&response.body)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn client() -> BookstoreClient {
        BookstoreClient::with_base_url("http://localhost:8080", Session::in_memory())
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn request_builds_absolute_url() {
        let req = client().request(HttpMethod::Get, "/api/dashboard/overview");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8080/api/dashboard/overview");
        assert!(req.headers.is_empty());
        assert!(matches!(req.body, RequestBody::Empty));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client =
            BookstoreClient::with_base_url("http://localhost:8080/", Session::in_memory());
        let req = client.request(HttpMethod::Get, "/api/dashboard/public-test");
        assert_eq!(req.url, "http://localhost:8080/api/dashboard/public-test");
    }

    #[test]
    fn parse_envelope_success() {
        let cats: Vec<Category> = parse_envelope(response(
            200,
            r#"{"success":true,"data":[{"categoryId":2,"categoryName":"History"}],"message":"ok"}"#,
        ))
        .unwrap();
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].category_id, 2);
    }

    #[test]
    fn parse_envelope_rejection_carries_message() {
        let err = parse_envelope::<Vec<Category>>(response(
            200,
            r#"{"success":false,"message":"no such book"}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, ApiError::Rejected(msg) if msg == "no such book"));
    }

    #[test]
    fn parse_envelope_success_without_data_is_rejection() {
        let err = parse_envelope::<Vec<Category>>(response(
            200,
            r#"{"success":true,"message":"ok"}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, ApiError::Rejected(_)));
    }

    #[test]
    fn parse_envelope_non_2xx_keeps_status_and_body() {
        let err = parse_envelope::<Vec<Category>>(response(500, "internal error")).unwrap_err();
        assert!(
            matches!(err, ApiError::HttpError { status: 500, ref body } if body == "internal error")
        );
    }

    #[test]
    fn parse_envelope_bad_json() {
        let err = parse_envelope::<Vec<Category>>(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_ack_success_and_failure() {
        parse_ack(response(200, r#"{"success":true,"message":"done"}"#)).unwrap();
        let err =
            parse_ack(response(200, r#"{"success":false,"message":"nope"}"#)).unwrap_err();
        assert!(matches!(err, ApiError::Rejected(msg) if msg == "nope"));
    }

    #[test]
    fn parse_json_plain_document() {
        let stats: crate::types::OverviewStats = parse_json(response(
            200,
            r#"{"totalUsers":1,"totalProducts":2,"totalOrders":3}"#,
        ))
        .unwrap();
        assert_eq!(stats.total_orders, 3);
    }
}
