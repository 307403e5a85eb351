//! Conditional request support for media responses

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// `Cache-Control` value sent with media
pub const MEDIA_CACHE_CONTROL: &str = "public, max-age=3600";

/// Quoted strong `ETag` derived from the body length and a content hash
pub fn etag_for(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}-{:x}\"", content.len(), hasher.finish())
}

/// Whether `If-None-Match` already names `etag` (or `*`)
pub fn is_fresh(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|header| {
        header.split(',').map(str::trim).any(|candidate| {
            candidate == "*" || candidate == etag || candidate.strip_prefix("W/") == Some(etag)
        })
    })
}
