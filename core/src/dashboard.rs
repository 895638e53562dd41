//! Dashboard statistics and the anonymous health check.

use crate::client::{ensure_success, parse_json, BookstoreClient};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::OverviewStats;

impl BookstoreClient {
    /// Fetch the admin dashboard counters via `GET /api/dashboard/overview`.
    ///
    /// The endpoint is role-gated: a valid session without the admin role
    /// surfaces as [`ApiError::HttpError`] with status 403.
    pub async fn dashboard_overview(&self) -> Result<OverviewStats, ApiError> {
        let request = self.request(HttpMethod::Get, "/api/dashboard/overview");
        let response = self.authenticated_request(request).await?;
        parse_json(response)
    }

    /// Anonymous reachability probe against `GET /api/dashboard/public-test`;
    /// returns the response text. Unlike the storefront reads this is a
    /// diagnostic, so failures propagate.
    pub async fn health_check(&self) -> Result<String, ApiError> {
        let request = self.request(HttpMethod::Get, "/api/dashboard/public-test");
        let response = self.send_public(request).await?;
        ensure_success(&response)?;
        Ok(response.body)
    }
}
