//! Content module
//!
//! The content data model, the fixed catalog it is built from, the read-only
//! store that answers `(id, type)` lookups, and the gallery listing.

pub mod catalog;
pub mod gallery;
mod model;
mod store;

pub use gallery::GalleryEntry;
pub use model::{
    ContentInfo, ContentType, ImageContain, MediaContent, Orientation, ParseContentTypeError,
    Playlist, Schedule, ScheduleContent,
};
pub use store::ContentStore;
