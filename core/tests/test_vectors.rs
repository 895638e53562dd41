//! Verify the pure helpers against JSON test vectors stored in
//! `test-vectors/`.
//!
//! Each vector file is a flat list of input/expected pairs. Keeping the
//! cases as data makes it cheap to pin down edge behavior (prefix
//! stacking, unit clamping) without a wall of near-identical asserts.

use bookstore_core::{format_file_size, image_url};

#[test]
fn image_url_test_vectors() {
    let raw = include_str!("../../test-vectors/image_url.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = case["input"].as_str().unwrap();
        let expected = case["expected"].as_str().unwrap();
        assert_eq!(image_url(input), expected, "{name}");
    }
}

#[test]
fn file_size_test_vectors() {
    let raw = include_str!("../../test-vectors/file_size.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = case["input"].as_u64().unwrap();
        let expected = case["expected"].as_str().unwrap();
        assert_eq!(format_file_size(input), expected, "{name}");
    }
}
