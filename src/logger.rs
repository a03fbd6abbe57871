//! Logger module
//!
//! Plain stdout/stderr logging: startup banner, one line per request, and
//! error/warning reporting. A local dev tool has no use for log files.

use crate::config::ServerState;
use hyper::Method;

/// Print the startup banner with the listening and demo URLs
pub fn log_server_start(state: &ServerState) {
    let base = state.config.base_url();
    println!("======================================");
    println!("Development file server started");
    println!("Server running at: {base}");
    println!("Demo page: {base}{}", state.config.routes.demo_page);
    println!("Serving files from: {}", state.root.display());
    println!();
    println!("Press Ctrl+C to stop the server");
    println!("======================================\n");
}

/// Log one request line, e.g. `GET /apps/demo/demo.html`
///
/// Written to stdout before the request is served, after the root rewrite.
pub fn log_request(method: &Method, path: &str) {
    println!("{method} {path}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}
