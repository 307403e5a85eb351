//! Embedded content server
//!
//! Advertises a fixed catalog of display content (images, canvases,
//! playlists, schedules) and streams the media files behind it over HTTP.

pub mod config;
pub mod content;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod media;
pub mod routing;
pub mod server;
