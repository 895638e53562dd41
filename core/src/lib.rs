//! Typed data-access client for the bookstore REST backend.
//!
//! # Overview
//! Wraps the storefront/admin backend's HTTP API: session handling with an
//! observable token store, book image management, generic image upload,
//! dashboard statistics, and the URL/validation utilities the UI layers
//! share. Every operation is an async unit of work over a single HTTP
//! round-trip — no queueing, no retries, no caching.
//!
//! # Design
//! - A [`Session`] is injected into [`BookstoreClient`]; there is no
//!   ambient global token.
//! - All requests flow through one executing path; the bearer-token
//!   contract (fail fast without a token, tear down the session on 401)
//!   lives in [`BookstoreClient::authenticated_request`] only.
//! - Admin operations propagate failures as [`ApiError`]; the anonymous
//!   storefront reads degrade to empty results so browsing survives
//!   backend hiccups.
//! - The network sits behind the [`HttpTransport`] trait; requests and
//!   responses are plain owned data, and the `mock-server` crate plus the
//!   integration tests exercise the real `reqwest` implementation.

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod http;
pub mod images;
pub mod media;
pub mod session;
pub mod transport;
pub mod types;
pub mod upload;

pub use client::{BookstoreClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{FilePart, HttpMethod, HttpRequest, HttpResponse, HttpTransport, MultipartForm, RequestBody};
pub use media::{book_image_urls, image_url, primary_image_url, PLACEHOLDER_IMAGE};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
pub use transport::ReqwestTransport;
pub use types::{
    ApiResponse, BookImage, CartItem, Category, CheckoutItem, CheckoutRequest,
    CheckoutResponse, InventoryTransaction, Order, OrderDetail, OverviewStats, Payment,
    Product, Role, TransactionType, User, UserStatus,
};
pub use upload::{
    format_file_size, validate_image_file, UploadFile, UploadedImage, MAX_UPLOAD_BYTES,
};
