use std::sync::Arc;

use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_state, AppState, BookImage, Envelope, MockUser, Overview};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn authed_request(method: &str, uri: &str, token: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(String::new())
        .unwrap()
}

const BOUNDARY: &str = "test-boundary";

fn multipart_request(
    uri: &str,
    token: &str,
    file_name: &str,
    content_type: &str,
    contents: &str,
    extra_fields: &[(&str, &str)],
) -> Request<String> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
         filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n{contents}\r\n"
    );
    for (name, value) in extra_fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(body)
        .unwrap()
}

async fn seeded_state(token: &str, role: &str) -> Arc<AppState> {
    let state = Arc::new(AppState::default());
    state
        .issue_token(token, MockUser::with_role(1, "tester", role))
        .await;
    state
}

// --- public endpoints ---

#[tokio::test]
async fn public_test_returns_text() {
    let resp = app()
        .oneshot(get_request("/api/dashboard/public-test"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"Public endpoint is working!");
}

#[tokio::test]
async fn public_image_list_is_open_and_empty() {
    let resp = app()
        .oneshot(get_request("/api/user/book-images/book/5"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: Envelope<Vec<BookImage>> = body_json(resp).await;
    assert!(envelope.success);
    assert!(envelope.data.unwrap().is_empty());
}

#[tokio::test]
async fn public_primary_without_images_is_domain_failure() {
    let resp = app()
        .oneshot(get_request("/api/user/book-images/book/5/primary"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: Envelope<BookImage> = body_json(resp).await;
    assert!(!envelope.success);
    assert_eq!(envelope.message, "No primary image");
}

// --- auth ---

#[tokio::test]
async fn admin_list_requires_token() {
    let resp = app()
        .oneshot(get_request("/api/admin/book-images/book/5"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_returns_user_for_valid_token() {
    let state = seeded_state("tok-1", "admin").await;
    let resp = app_with_state(state)
        .oneshot(authed_request("GET", "/api/auth/me", "tok-1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let user: MockUser = body_json(resp).await;
    assert_eq!(user.username, "tester");
    assert_eq!(user.role, "admin");
}

#[tokio::test]
async fn me_rejects_unknown_token() {
    let resp = app()
        .oneshot(authed_request("GET", "/api/auth/me", "nope"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_removes_the_session() {
    let state = seeded_state("tok-2", "admin").await;

    let resp = app_with_state(Arc::clone(&state))
        .oneshot(authed_request("POST", "/api/auth/logout", "tok-2"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!state.has_session("tok-2").await);

    // Token is dead now; a second logout bounces.
    let resp = app_with_state(state)
        .oneshot(authed_request("POST", "/api/auth/logout", "tok-2"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- dashboard ---

#[tokio::test]
async fn dashboard_overview_for_admin() {
    let state = seeded_state("tok-3", "admin").await;
    state
        .set_stats(Overview {
            total_users: 4,
            total_products: 9,
            total_orders: 2,
        })
        .await;

    let resp = app_with_state(state)
        .oneshot(authed_request("GET", "/api/dashboard/overview", "tok-3"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let overview: Overview = body_json(resp).await;
    assert_eq!(overview.total_products, 9);
}

#[tokio::test]
async fn dashboard_overview_forbidden_for_staff() {
    let state = seeded_state("tok-4", "staff").await;
    let resp = app_with_state(state)
        .oneshot(authed_request("GET", "/api/dashboard/overview", "tok-4"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// --- uploads ---

#[tokio::test]
async fn upload_rejects_non_image() {
    let state = seeded_state("tok-5", "admin").await;
    let resp = app_with_state(state)
        .oneshot(multipart_request(
            "/api/upload/image",
            "tok-5",
            "notes.txt",
            "text/plain",
            "hello",
            &[],
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(&body_bytes(resp).await[..], b"File must be an image");
}

#[tokio::test]
async fn book_image_upload_and_primary_flow() {
    use tower::Service;

    let state = seeded_state("tok-6", "admin").await;
    let mut app = app_with_state(state).into_service();

    // First upload, flagged primary.
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(multipart_request(
            "/api/admin/book-images/book/3/upload",
            "tok-6",
            "front.png",
            "image/png",
            "png-bytes",
            &[("description", "front cover"), ("isPrimary", "true")],
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: Envelope<BookImage> = body_json(resp).await;
    assert!(envelope.success);
    let first = envelope.data.unwrap();
    assert!(first.is_primary);
    assert_eq!(first.description.as_deref(), Some("front cover"));

    // Second upload, also primary — must demote the first.
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(multipart_request(
            "/api/admin/book-images/book/3/upload",
            "tok-6",
            "back.png",
            "image/png",
            "png-bytes",
            &[("isPrimary", "true")],
        ))
        .await
        .unwrap();
    let envelope: Envelope<BookImage> = body_json(resp).await;
    let second = envelope.data.unwrap();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed_request(
            "GET",
            "/api/admin/book-images/book/3",
            "tok-6",
        ))
        .await
        .unwrap();
    let envelope: Envelope<Vec<BookImage>> = body_json(resp).await;
    let images = envelope.data.unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(
        images.iter().filter(|i| i.is_primary).count(),
        1,
        "exactly one primary"
    );

    // Move the flag back to the first image.
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed_request(
            "PUT",
            &format!("/api/admin/book-images/{}/set-primary", first.image_id),
            "tok-6",
        ))
        .await
        .unwrap();
    let envelope: Envelope<BookImage> = body_json(resp).await;
    assert!(envelope.success);

    // Delete the second; only the first remains, still primary.
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed_request(
            "DELETE",
            &format!("/api/admin/book-images/{}", second.image_id),
            "tok-6",
        ))
        .await
        .unwrap();
    let envelope: Envelope<BookImage> = body_json(resp).await;
    assert!(envelope.success);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/user/book-images/book/3"))
        .await
        .unwrap();
    let envelope: Envelope<Vec<BookImage>> = body_json(resp).await;
    let images = envelope.data.unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].image_id, first.image_id);
    assert!(images[0].is_primary);
}

#[tokio::test]
async fn set_primary_on_unknown_image_is_domain_failure() {
    let state = seeded_state("tok-7", "admin").await;
    let resp = app_with_state(state)
        .oneshot(authed_request(
            "PUT",
            "/api/admin/book-images/999/set-primary",
            "tok-7",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: Envelope<BookImage> = body_json(resp).await;
    assert!(!envelope.success);
    assert_eq!(envelope.message, "Image not found");
}
