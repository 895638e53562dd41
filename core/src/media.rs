//! Image URL normalization for paths handed back by the backend.
//!
//! The backend stores image paths in several historical shapes
//! (`uploads/x.jpg`, `/static/img/x.jpg`, bare filenames, absolute URLs).
//! Everything funnels into the single `/api/images/{name}` serving
//! endpoint, which resolves upload storage before static storage — this
//! layer only produces the URL.

use crate::client::DEFAULT_BASE_URL;
use crate::types::BookImage;

/// Path shown when a book has no usable image.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-book.jpg";

/// Known storage prefixes, checked in this order; at most one is stripped.
const KNOWN_PREFIXES: [&str; 3] = ["uploads/", "static/img/", "img/"];

/// Normalize a backend image path into a fetchable URL. Total function:
/// empty input maps to the placeholder, absolute URLs pass through
/// unchanged, everything else is composed onto the image-serving endpoint.
pub fn image_url(path: &str) -> String {
    if path.is_empty() {
        return PLACEHOLDER_IMAGE.to_string();
    }
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    let mut clean = path.strip_prefix('/').unwrap_or(path);
    for prefix in KNOWN_PREFIXES {
        if let Some(rest) = clean.strip_prefix(prefix) {
            clean = rest;
            break;
        }
    }

    format!("{DEFAULT_BASE_URL}/api/images/{clean}")
}

/// Normalized URLs for every image of a book; a book with no images gets
/// the single placeholder.
pub fn book_image_urls(images: &[BookImage]) -> Vec<String> {
    if images.is_empty() {
        return vec![image_url("")];
    }
    images.iter().map(|img| image_url(&img.image_url)).collect()
}

/// URL of the image flagged primary; falls back to the first image in
/// order, then to the placeholder.
pub fn primary_image_url(images: &[BookImage]) -> String {
    match images.iter().find(|img| img.is_primary).or_else(|| images.first()) {
        Some(image) => image_url(&image.image_url),
        None => image_url(""),
    }
}
