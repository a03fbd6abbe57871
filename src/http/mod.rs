//! HTTP protocol layer module
//!
//! Protocol-level helpers decoupled from the file-serving business logic:
//! MIME tables, Range parsing, conditional-request handling, CORS decoration,
//! and response builders.

pub mod cache;
pub mod cors;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used items
pub use range::evaluate_range_header;
pub use response::{
    build_404_response, build_405_response, build_416_response, build_preflight_response,
};
