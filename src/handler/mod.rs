//! Request handler module
//!
//! The route table, request dispatch, and the endpoint handlers for
//! content, media and the text demo routes.

pub mod content;
pub mod demo;
pub mod media;
pub mod router;
pub mod routes;

// Re-export main entry point
pub use router::{dispatch, handle_request, RequestContext};
pub use routes::{build_router, Endpoint};
