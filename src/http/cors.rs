//! CORS response decoration module
//!
//! Every response leaves the router through `decorate_response`, which adds
//! the permissive CORS headers needed for local front-end development and
//! applies the streaming Content-Type overrides keyed on the request path.

use crate::http::mime;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::http::HeaderMap;

#[allow(clippy::declare_interior_mutable_const)]
const ALLOW_ORIGIN: HeaderValue = HeaderValue::from_static("*");
#[allow(clippy::declare_interior_mutable_const)]
const ALLOW_METHODS: HeaderValue = HeaderValue::from_static("GET, POST, OPTIONS");
#[allow(clippy::declare_interior_mutable_const)]
const ALLOW_HEADERS: HeaderValue = HeaderValue::from_static("Content-Type, Range");

/// Decorate a response's headers before it is returned
///
/// Applied to every response regardless of status code. `request_path` is the
/// path the client asked for (after the root rewrite), matched case-sensitively
/// against the streaming suffixes.
pub fn decorate_response(headers: &mut HeaderMap, request_path: &str) {
    headers.insert("Access-Control-Allow-Origin", ALLOW_ORIGIN);
    headers.insert("Access-Control-Allow-Methods", ALLOW_METHODS);
    headers.insert("Access-Control-Allow-Headers", ALLOW_HEADERS);

    if let Some(content_type) = mime::streaming_override(request_path) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_headers_added() {
        let mut headers = HeaderMap::new();
        decorate_response(&mut headers, "/apps/demo/demo.html");

        assert_eq!(headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(headers["Access-Control-Allow-Methods"], "GET, POST, OPTIONS");
        assert_eq!(headers["Access-Control-Allow-Headers"], "Content-Type, Range");
    }

    #[test]
    fn test_streaming_override_replaces_content_type() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"));
        decorate_response(&mut headers, "/videos/seg-001.ts");

        assert_eq!(headers[CONTENT_TYPE], "video/MP2T");
    }

    #[test]
    fn test_non_streaming_content_type_untouched() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
        decorate_response(&mut headers, "/apps/demo/demo.html");

        assert_eq!(headers[CONTENT_TYPE], "text/html; charset=utf-8");
    }

    #[test]
    fn test_override_suffix_is_case_sensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"));
        decorate_response(&mut headers, "/videos/SEG.TS");

        assert_eq!(headers[CONTENT_TYPE], "application/octet-stream");
    }
}
