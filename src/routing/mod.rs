//! Routing module
//!
//! Matches request paths against literal, parameter and wildcard patterns:
//! - Per-method route tables, built once at startup
//! - Most specific match wins (literal > parameter > `*` > `**`)
//! - Typed path parameter and query accessors

mod matcher;
mod params;
mod pattern;

pub use matcher::{RouteMatch, Router};
pub use params::{PathParams, QueryParams};
pub use pattern::{RoutePattern, Segment, Specificity};
