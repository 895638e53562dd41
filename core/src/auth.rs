//! Session lifecycle operations: logout, accessors, current user.
//!
//! # Design
//! `logout` is best-effort on the wire and unconditional locally: whatever
//! the logout endpoint answers (or fails to answer), the token is cleared
//! and session subscribers are notified with `None`. That makes it safe to
//! call from the 401 branch of the centralized executor — the server-side
//! notify may itself bounce off the dead token, which is fine.

use crate::client::{parse_json, BookstoreClient};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::User;

impl BookstoreClient {
    /// Terminate the session.
    ///
    /// If a token is stored, notifies the backend with a best-effort
    /// `POST /api/auth/logout`; any failure there is logged, never
    /// propagated. The local token is cleared unconditionally and session
    /// subscribers are notified with `None`.
    pub async fn logout(&self) {
        if let Some(token) = self.session().token().filter(|t| !t.is_empty()) {
            let mut request = self.request(HttpMethod::Post, "/api/auth/logout");
            request
                .headers
                .push(("Authorization".to_string(), format!("Bearer {token}")));
            match self.send_public(request).await {
                Ok(response) if !response.is_success() => {
                    log::warn!(
                        "logout endpoint returned HTTP {}, clearing local session anyway",
                        response.status
                    );
                }
                Err(err) => {
                    log::warn!("logout request failed ({err}), clearing local session anyway");
                }
                Ok(_) => {}
            }
        }
        self.session().clear();
    }

    /// True when a non-empty token is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    /// Current token, if any.
    pub fn token(&self) -> Option<String> {
        self.session().token()
    }

    /// Headers to attach to a hand-built authenticated request: the bearer
    /// header when a token exists, nothing otherwise.
    pub fn auth_headers(&self) -> Vec<(String, String)> {
        match self.session().token().filter(|t| !t.is_empty()) {
            Some(token) => vec![("Authorization".to_string(), format!("Bearer {token}"))],
            None => Vec::new(),
        }
    }

    /// Fetch the profile behind the current token via `GET /api/auth/me`.
    ///
    /// Returns `None` when no token is stored, the request fails, or the
    /// body does not parse. A 401 clears the session (the executor's
    /// contract); any other failure leaves the session intact.
    pub async fn current_user(&self) -> Option<User> {
        let request = self.request(HttpMethod::Get, "/api/auth/me");
        match self.authenticated_request(request).await {
            Ok(response) => match parse_json::<User>(response) {
                Ok(user) => Some(user),
                Err(err) => {
                    log::warn!("current-user request failed: {err}");
                    None
                }
            },
            Err(ApiError::MissingToken) => None,
            Err(err) => {
                log::warn!("current-user request failed: {err}");
                None
            }
        }
    }
}
