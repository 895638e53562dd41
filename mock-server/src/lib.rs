use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockUser {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub status: String,
}

impl MockUser {
    pub fn admin(user_id: i64, username: &str) -> Self {
        Self::with_role(user_id, username, "admin")
    }

    pub fn with_role(user_id: i64, username: &str, role: &str) -> Self {
        Self {
            user_id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            role: role.to_string(),
            status: "active".to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookImage {
    pub image_id: i64,
    pub book_id: i64,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_primary: bool,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_users: i64,
    pub total_products: i64,
    pub total_orders: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub url: String,
}

/// The `{success, data, message}` wrapper the real backend uses for every
/// book-image endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
}

impl<T> Envelope<T> {
    pub fn ok(data: T, message: &str) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.to_string(),
        }
    }

    /// Success without a payload (set-primary, delete).
    pub fn ack(message: &str) -> Self {
        Self {
            success: true,
            data: None,
            message: message.to_string(),
        }
    }

    /// The backend's convention for domain failures: HTTP 200 with
    /// `success:false`.
    pub fn fail(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            message: message.to_string(),
        }
    }
}

#[derive(Default)]
pub struct AppState {
    sessions: RwLock<HashMap<String, MockUser>>,
    images: RwLock<HashMap<i64, BookImage>>,
    next_id: RwLock<i64>,
    stats: RwLock<Overview>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Register a token as a live session for `user`.
    pub async fn issue_token(&self, token: &str, user: MockUser) {
        self.sessions
            .write()
            .await
            .insert(token.to_string(), user);
    }

    pub async fn has_session(&self, token: &str) -> bool {
        self.sessions.read().await.contains_key(token)
    }

    pub async fn set_stats(&self, stats: Overview) {
        *self.stats.write().await = stats;
    }

    pub async fn image_count(&self) -> usize {
        self.images.read().await.len()
    }

    async fn store_image(
        &self,
        book_id: i64,
        file_name: &str,
        description: Option<String>,
        is_primary: bool,
    ) -> BookImage {
        let image_id = self.next_value().await;
        let image = BookImage {
            image_id,
            book_id,
            image_url: format!("uploads/img-{image_id}-{file_name}"),
            description,
            is_primary,
            uploaded_at: Utc::now(),
        };
        let mut images = self.images.write().await;
        if is_primary {
            for other in images.values_mut().filter(|i| i.book_id == book_id) {
                other.is_primary = false;
            }
        }
        images.insert(image_id, image.clone());
        image
    }

    async fn next_value(&self) -> i64 {
        let mut next = self.next_id.write().await;
        *next += 1;
        *next
    }
}

pub fn app() -> Router {
    app_with_state(Arc::new(AppState::default()))
}

pub fn app_with_state(state: SharedState) -> Router {
    Router::new()
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(current_user))
        .route("/api/admin/book-images/book/{book_id}", get(admin_list_images))
        .route(
            "/api/admin/book-images/book/{book_id}/upload",
            post(admin_upload_image),
        )
        .route(
            "/api/admin/book-images/{image_id}/set-primary",
            put(set_primary_image),
        )
        .route("/api/admin/book-images/{image_id}", delete(delete_image))
        .route("/api/user/book-images/book/{book_id}", get(public_list_images))
        .route(
            "/api/user/book-images/book/{book_id}/primary",
            get(public_primary_image),
        )
        .route("/api/dashboard/overview", get(dashboard_overview))
        .route("/api/dashboard/public-test", get(public_test))
        .route("/api/upload/image", post(upload_image))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, Arc::new(AppState::default())).await
}

pub async fn serve(listener: TcpListener, state: SharedState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

async fn authorize(state: &AppState, headers: &HeaderMap) -> Option<MockUser> {
    let token = bearer_token(headers)?;
    state.sessions.read().await.get(token).cloned()
}

async fn list_for_book(state: &AppState, book_id: i64) -> Vec<BookImage> {
    let mut images: Vec<BookImage> = state
        .images
        .read()
        .await
        .values()
        .filter(|i| i.book_id == book_id)
        .cloned()
        .collect();
    images.sort_by_key(|i| i.image_id);
    images
}

async fn logout(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    if state.sessions.write().await.remove(token).is_some() {
        (StatusCode::OK, "Logged out").into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

async fn current_user(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    match authorize(&state, &headers).await {
        Some(user) => Json(user).into_response(),
        None => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn admin_list_images(
    State(state): State<SharedState>,
    Path(book_id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if authorize(&state, &headers).await.is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let images = list_for_book(&state, book_id).await;
    Json(Envelope::ok(images, "Image list fetched")).into_response()
}

async fn admin_upload_image(
    State(state): State<SharedState>,
    Path(book_id): Path<i64>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    if authorize(&state, &headers).await.is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let form = match read_upload_form(multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    let image = state
        .store_image(book_id, &form.file_name, form.description, form.is_primary)
        .await;
    Json(Envelope::ok(image, "Image uploaded")).into_response()
}

async fn set_primary_image(
    State(state): State<SharedState>,
    Path(image_id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if authorize(&state, &headers).await.is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let mut images = state.images.write().await;
    let Some(book_id) = images.get(&image_id).map(|i| i.book_id) else {
        return Json(Envelope::<BookImage>::fail("Image not found")).into_response();
    };
    for image in images.values_mut().filter(|i| i.book_id == book_id) {
        image.is_primary = image.image_id == image_id;
    }
    Json(Envelope::<BookImage>::ack("Primary image set")).into_response()
}

async fn delete_image(
    State(state): State<SharedState>,
    Path(image_id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if authorize(&state, &headers).await.is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if state.images.write().await.remove(&image_id).is_none() {
        return Json(Envelope::<BookImage>::fail("Image not found")).into_response();
    }
    Json(Envelope::<BookImage>::ack("Image deleted")).into_response()
}

async fn public_list_images(
    State(state): State<SharedState>,
    Path(book_id): Path<i64>,
) -> Response {
    let images = list_for_book(&state, book_id).await;
    Json(Envelope::ok(images, "Image list fetched")).into_response()
}

async fn public_primary_image(
    State(state): State<SharedState>,
    Path(book_id): Path<i64>,
) -> Response {
    let primary = list_for_book(&state, book_id)
        .await
        .into_iter()
        .find(|i| i.is_primary);
    match primary {
        Some(image) => Json(Envelope::ok(image, "Primary image fetched")).into_response(),
        None => Json(Envelope::<BookImage>::fail("No primary image")).into_response(),
    }
}

async fn dashboard_overview(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    match authorize(&state, &headers).await {
        None => StatusCode::UNAUTHORIZED.into_response(),
        Some(user) if user.role != "admin" => (
            StatusCode::FORBIDDEN,
            "Access denied - Admin role required",
        )
            .into_response(),
        Some(_) => Json(*state.stats.read().await).into_response(),
    }
}

async fn public_test() -> &'static str {
    "Public endpoint is working!"
}

async fn upload_image(
    State(state): State<SharedState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    if authorize(&state, &headers).await.is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let form = match read_upload_form(multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    let filename = format!("upload-{}-{}", state.next_value().await, form.file_name);
    Json(UploadResponse {
        url: format!("/api/images/{filename}"),
        filename,
    })
    .into_response()
}

struct UploadForm {
    file_name: String,
    description: Option<String>,
    is_primary: bool,
}

/// Pull the `file` part plus optional `description`/`isPrimary` fields out
/// of a multipart body, rejecting non-image or empty files the way the
/// real backend does (400 with a text body).
async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, Response> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut description = None;
    let mut is_primary = false;

    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload.bin").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                match field.bytes().await {
                    Ok(data) => file = Some((file_name, content_type, data.to_vec())),
                    Err(_) => {
                        return Err(
                            (StatusCode::BAD_REQUEST, "File is empty").into_response()
                        )
                    }
                }
            }
            Some("description") => description = field.text().await.ok(),
            Some("isPrimary") => {
                is_primary = matches!(field.text().await.as_deref(), Ok("true"));
            }
            _ => {}
        }
    }

    let Some((file_name, content_type, data)) = file else {
        return Err((StatusCode::BAD_REQUEST, "File is empty").into_response());
    };
    if data.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "File is empty").into_response());
    }
    if !content_type.starts_with("image/") {
        return Err((StatusCode::BAD_REQUEST, "File must be an image").into_response());
    }

    Ok(UploadForm {
        file_name,
        description,
        is_primary,
    })
}
