//! HTTP protocol layer module
//!
//! Response builders, MIME detection and `ETag` handling, independent of
//! routing and content semantics.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_404_response, build_413_response, build_error_response,
    build_json_response, build_media_response, build_options_response, build_text_response,
    strip_body, with_server_header,
};
