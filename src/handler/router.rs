//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: explicit method dispatch, the
//! root-path rewrite hook, and the response decoration hook. Every response,
//! success or error, passes through `cors::decorate_response` on the way out.

use crate::config::ServerState;
use crate::handler::static_files;
use crate::http::{self, cors};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Request path after the root rewrite
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
    pub range_header: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<ServerState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let raw_path = req.uri().path().to_string();

    let (mut response, decorate_path) = match method {
        Method::OPTIONS => (http::build_preflight_response(), raw_path),
        Method::GET | Method::HEAD => {
            let path = rewrite_path(&raw_path, &state.config.routes.demo_page);
            if state.config.logging.access_log {
                logger::log_request(&method, &path);
            }

            let ctx = RequestContext {
                path: &path,
                is_head: method == Method::HEAD,
                if_none_match: header_value(&req, "if-none-match"),
                if_modified_since: header_value(&req, "if-modified-since"),
                range_header: header_value(&req, "range"),
            };

            let response = static_files::serve(&ctx, &state).await;
            (response, path)
        }
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            (http::build_405_response(), raw_path)
        }
    };

    cors::decorate_response(response.headers_mut(), &decorate_path);
    Ok(response)
}

/// Pre-routing rewrite hook: the bare root is served as the demo page
///
/// The rewrite happens before lookup, so `/` and the demo page itself return
/// identical responses.
fn rewrite_path(path: &str, demo_page: &str) -> String {
    if path == "/" {
        demo_page.to_string()
    } else {
        path.to_string()
    }
}

/// Extract a request header as an owned string
fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_rewritten_to_demo_page() {
        assert_eq!(
            rewrite_path("/", "/apps/demo/demo.html"),
            "/apps/demo/demo.html"
        );
    }

    #[test]
    fn test_other_paths_pass_through() {
        assert_eq!(
            rewrite_path("/videos/master.m3u8", "/apps/demo/demo.html"),
            "/videos/master.m3u8"
        );
        // Only the exact root is rewritten
        assert_eq!(rewrite_path("//", "/apps/demo/demo.html"), "//");
    }
}
