//! Static file serving module
//!
//! Maps request paths to files under the serving root, with traversal
//! protection, index-file fallback, directory listings, and conditional /
//! range request handling.

use crate::config::ServerState;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::http::range::{evaluate_range_header, RangeOutcome};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;

/// Characters percent-encoded when building listing hrefs
const HREF_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'%');

/// A request path resolved to a real filesystem object under the root
#[derive(Debug)]
enum Resolved {
    File(PathBuf),
    Directory(PathBuf),
}

/// Serve a GET/HEAD request from the filesystem
pub async fn serve(ctx: &RequestContext<'_>, state: &ServerState) -> Response<Full<Bytes>> {
    let Some(resolved) = resolve_request_path(&state.root, ctx.path) else {
        return http::build_404_response();
    };

    match resolved {
        Resolved::File(path) => serve_file(ctx, &path).await,
        Resolved::Directory(dir) => {
            match find_index_file(&dir, &state.config.routes.index_files) {
                Some(index) => serve_file(ctx, &index).await,
                None => serve_listing(ctx, &dir).await,
            }
        }
    }
}

/// Resolve a request path to a file or directory under `root`
///
/// The path is percent-decoded, joined under the root, and canonicalized;
/// the result must still live under the canonical root. Traversal sequences
/// (encoded or not) and symlinks pointing outside the root all fail the
/// containment check and collapse to a 404.
fn resolve_request_path(root: &Path, path: &str) -> Option<Resolved> {
    let decoded = percent_decode_str(path).decode_utf8().ok()?;
    if decoded.contains('\0') {
        return None;
    }

    let relative = decoded.trim_start_matches('/');
    let joined = root.join(relative);

    // Missing files fail to canonicalize, which is the common 404
    let canonical = joined.canonicalize().ok()?;
    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {path} -> {}",
            canonical.display()
        ));
        return None;
    }

    let metadata = std::fs::metadata(&canonical).ok()?;
    if metadata.is_file() {
        Some(Resolved::File(canonical))
    } else if metadata.is_dir() {
        Some(Resolved::Directory(canonical))
    } else {
        None
    }
}

/// Find the first configured index file present in a directory
fn find_index_file(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    index_files
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Load a file and build the response around it
async fn serve_file(ctx: &RequestContext<'_>, path: &Path) -> Response<Full<Bytes>> {
    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            return http::build_404_response();
        }
    };

    let mtime = fs::metadata(path).await.ok().and_then(|m| m.modified().ok());
    let content_type = mime::get_content_type(path.extension().and_then(|e| e.to_str()));

    build_file_response(ctx, content, content_type, mtime)
}

/// Build the 200/206/304/416 response for loaded file content
#[allow(clippy::cast_possible_truncation)]
fn build_file_response(
    ctx: &RequestContext<'_>,
    content: Vec<u8>,
    content_type: &'static str,
    mtime: Option<SystemTime>,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&content);
    let last_modified = mtime.map(cache::format_http_date);
    let total_size = content.len() as u64;

    let etag_fresh = cache::etag_matches(ctx.if_none_match.as_deref(), &etag);
    let mtime_fresh = ctx.if_none_match.is_none()
        && mtime.is_some_and(|t| cache::not_modified_since(ctx.if_modified_since.as_deref(), t));
    if etag_fresh || mtime_fresh {
        return http::response::build_304_response(&etag, last_modified.as_deref());
    }

    match evaluate_range_header(ctx.range_header.as_deref(), total_size) {
        RangeOutcome::Satisfiable(range) => {
            // start/end are bounded by content.len(), so the casts are exact
            let slice = &content[range.start as usize..=range.end as usize];
            http::response::build_partial_response(
                Bytes::copy_from_slice(slice),
                content_type,
                &etag,
                last_modified.as_deref(),
                range.start,
                range.end,
                total_size,
                ctx.is_head,
            )
        }
        RangeOutcome::NotSatisfiable => http::build_416_response(total_size),
        RangeOutcome::Ignored => http::response::build_file_response(
            Bytes::from(content),
            content_type,
            &etag,
            last_modified.as_deref(),
            ctx.is_head,
        ),
    }
}

/// A single listing row
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListingEntry {
    name: String,
    is_dir: bool,
}

/// Render a directory listing when no index file matches
async fn serve_listing(ctx: &RequestContext<'_>, dir: &Path) -> Response<Full<Bytes>> {
    let entries = match collect_entries(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to list directory '{}': {e}",
                dir.display()
            ));
            return http::build_404_response();
        }
    };

    let html = render_directory_listing(ctx.path, &entries);
    http::response::build_html_response(html, ctx.is_head)
}

/// Collect and sort directory entries
async fn collect_entries(dir: &Path) -> io::Result<Vec<ListingEntry>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry
            .file_type()
            .await
            .map(|t| t.is_dir())
            .unwrap_or(false);
        entries.push(ListingEntry { name, is_dir });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Render the listing page HTML
///
/// Hrefs are built from the request path so links work whether or not the
/// directory URL carries a trailing slash.
fn render_directory_listing(request_path: &str, entries: &[ListingEntry]) -> String {
    let display_path = escape_html(request_path);
    let base = request_path.strip_suffix('/').unwrap_or(request_path);

    let mut html = String::new();
    html.push_str("<!DOCTYPE HTML>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!(
        "<title>Directory listing for {display_path}</title>\n</head>\n<body>\n"
    ));
    html.push_str(&format!("<h1>Directory listing for {display_path}</h1>\n<hr>\n<ul>\n"));

    for entry in entries {
        let suffix = if entry.is_dir { "/" } else { "" };
        let encoded = utf8_percent_encode(&entry.name, HREF_ENCODE_SET);
        let display = escape_html(&entry.name);
        html.push_str(&format!(
            "<li><a href=\"{base}/{encoded}{suffix}\">{display}{suffix}</a></li>\n"
        ));
    }

    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

/// Escape special characters for HTML text
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
