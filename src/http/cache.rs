//! HTTP cache control module
//!
//! `ETag` generation and conditional request handling
//! (`If-None-Match`, `Last-Modified` / `If-Modified-Since`).

use chrono::{DateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::SystemTime;

/// Generate an `ETag` using fast hashing
///
/// Returns a quoted `ETag` string, e.g. `"abc123def"`.
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check if the client's `If-None-Match` header matches the server's `ETag`
///
/// Supports a single `ETag`, a comma-separated list, and the `*` wildcard.
/// Returns true if matched (respond 304).
pub fn etag_matches(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}

/// Format a filesystem timestamp as an RFC 7231 HTTP-date
///
/// e.g. `Thu, 01 Jan 1970 00:00:00 GMT`
pub fn format_http_date(time: SystemTime) -> String {
    let datetime: DateTime<Utc> = time.into();
    datetime.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an HTTP-date header value
///
/// Only the IMF-fixdate form sent by current clients is accepted; the
/// RFC 2822 parser covers it, including the `GMT` zone name.
pub fn parse_http_date(value: &str) -> Option<SystemTime> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|dt| SystemTime::from(dt.with_timezone(&Utc)))
}

/// Check an `If-Modified-Since` header against the file mtime
///
/// HTTP-dates carry whole seconds, so the mtime is truncated to second
/// granularity before comparing. Returns true if the client's copy is still
/// fresh (respond 304).
pub fn not_modified_since(if_modified_since: Option<&str>, mtime: SystemTime) -> bool {
    let Some(since) = if_modified_since.and_then(parse_http_date) else {
        return false;
    };

    let to_secs = |t: SystemTime| {
        t.duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .ok()
    };

    match (to_secs(mtime), to_secs(since)) {
        (Some(modified), Some(since)) => modified <= since,
        _ => false,
    }
}
