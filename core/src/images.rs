//! Book image clients: the admin CRUD surface and the anonymous
//! storefront reads.
//!
//! # Design
//! The two halves share endpoints shapes but not an error policy. Admin
//! operations require a token and propagate every failure so the panel can
//! surface it. The storefront reads are used on anonymous pages where a
//! broken backend must not break browsing: any failure — transport, status
//! or envelope — is logged and degraded to an empty result.

use crate::client::{parse_ack, parse_envelope, BookstoreClient};
use crate::error::ApiError;
use crate::http::{FilePart, HttpMethod, MultipartForm, RequestBody};
use crate::types::BookImage;
use crate::upload::{validate_upload, UploadFile};

impl BookstoreClient {
    /// List all images of a book. Admin endpoint.
    pub async fn book_images(&self, book_id: i64) -> Result<Vec<BookImage>, ApiError> {
        let request = self.request(
            HttpMethod::Get,
            &format!("/api/admin/book-images/book/{book_id}"),
        );
        let response = self.authenticated_request(request).await?;
        parse_envelope(response)
    }

    /// Upload an image for a book. Admin endpoint.
    ///
    /// The file is validated (MIME type, size) before any network attempt;
    /// invalid files fail with [`ApiError::ValidationError`] and no request
    /// is sent.
    pub async fn upload_book_image(
        &self,
        book_id: i64,
        file: UploadFile,
        description: Option<&str>,
        is_primary: bool,
    ) -> Result<BookImage, ApiError> {
        validate_upload(&file)?;

        let mut texts = Vec::new();
        if let Some(description) = description {
            texts.push(("description".to_string(), description.to_string()));
        }
        texts.push(("isPrimary".to_string(), is_primary.to_string()));

        let mut request = self.request(
            HttpMethod::Post,
            &format!("/api/admin/book-images/book/{book_id}/upload"),
        );
        request.body = RequestBody::Multipart(MultipartForm {
            file: FilePart {
                name: "file".to_string(),
                file_name: file.file_name,
                content_type: file.content_type,
                data: file.data,
            },
            texts,
        });

        let response = self.authenticated_request(request).await?;
        parse_envelope(response)
    }

    /// Flag an image as its book's primary image. Admin endpoint.
    pub async fn set_primary_image(&self, image_id: i64) -> Result<(), ApiError> {
        let request = self.request(
            HttpMethod::Put,
            &format!("/api/admin/book-images/{image_id}/set-primary"),
        );
        let response = self.authenticated_request(request).await?;
        parse_ack(response)
    }

    /// Delete an image. Admin endpoint.
    pub async fn delete_book_image(&self, image_id: i64) -> Result<(), ApiError> {
        let request = self.request(
            HttpMethod::Delete,
            &format!("/api/admin/book-images/{image_id}"),
        );
        let response = self.authenticated_request(request).await?;
        parse_ack(response)
    }

    /// List all images of a book, anonymously. Never fails: any error is
    /// logged and an empty list returned.
    pub async fn public_book_images(&self, book_id: i64) -> Vec<BookImage> {
        let request = self.request(
            HttpMethod::Get,
            &format!("/api/user/book-images/book/{book_id}"),
        );
        match self.send_public(request).await.and_then(parse_envelope) {
            Ok(images) => images,
            Err(err) => {
                log::warn!("failed to fetch public book images: {err}");
                Vec::new()
            }
        }
    }

    /// Fetch a book's primary image, anonymously. Never fails: any error
    /// (including "no primary image") is logged and `None` returned.
    pub async fn public_primary_image(&self, book_id: i64) -> Option<BookImage> {
        let request = self.request(
            HttpMethod::Get,
            &format!("/api/user/book-images/book/{book_id}/primary"),
        );
        match self.send_public(request).await.and_then(parse_envelope) {
            Ok(image) => Some(image),
            Err(err) => {
                log::warn!("failed to fetch primary image: {err}");
                None
            }
        }
    }
}
