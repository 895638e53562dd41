//! Generic image upload plus the pre-flight checks shared with the book
//! image upload, and the human-readable size formatter.

use serde::{Deserialize, Serialize};

use crate::client::{parse_json, BookstoreClient};
use crate::error::ApiError;
use crate::http::{FilePart, HttpMethod, MultipartForm, RequestBody};

/// Hard cap the backend enforces on upload size.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// A file selected for upload: name, MIME type and contents as owned data.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Response of `POST /api/upload/image` (served without the envelope).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub filename: String,
    pub url: String,
}

/// MIME-type and size checks run by every upload operation before the
/// network is touched.
pub(crate) fn validate_upload(file: &UploadFile) -> Result<(), ApiError> {
    if !file.content_type.starts_with("image/") {
        return Err(ApiError::ValidationError(
            "File must be an image".to_string(),
        ));
    }
    if file.size() > MAX_UPLOAD_BYTES {
        return Err(ApiError::ValidationError(
            "File size must be less than 10MB".to_string(),
        ));
    }
    Ok(())
}

/// Full pre-upload validation: MIME type, size, and file extension.
pub fn validate_image_file(file: &UploadFile) -> Result<(), ApiError> {
    validate_upload(file)?;
    let name = file.file_name.to_lowercase();
    if !ALLOWED_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
        return Err(ApiError::ValidationError(
            "File must be a valid image format (JPG, PNG, GIF, WebP)".to_string(),
        ));
    }
    Ok(())
}

/// Format a byte count for display: `0` is `"0 Bytes"`, everything else is
/// scaled to the largest unit under 1024 (capped at GB) and rounded to two
/// decimals with trailing zeros dropped.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let tier = (bytes.ilog(1024) as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(tier as i32);
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[tier])
}

impl BookstoreClient {
    /// Upload a standalone image via `POST /api/upload/image`.
    ///
    /// Validates the file before any network attempt, then sends it as the
    /// `file` part of a multipart form. The backend answers with the stored
    /// filename and its serving URL.
    pub async fn upload_image(&self, file: UploadFile) -> Result<UploadedImage, ApiError> {
        validate_upload(&file)?;

        let mut request = self.request(HttpMethod::Post, "/api/upload/image");
        request.body = RequestBody::Multipart(MultipartForm {
            file: FilePart {
                name: "file".to_string(),
                file_name: file.file_name,
                content_type: file.content_type,
                data: file.data,
            },
            texts: Vec::new(),
        });

        let response = self.authenticated_request(request).await?;
        parse_json(response)
    }
}
