//! Content descriptors
//!
//! `ContentInfo` is a tagged union serialized with a `contentType`
//! discriminator; each variant carries only the fields its type uses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ContentError;

/// Content type discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentType {
    ImageContent,
    CanvasContent,
    PlaylistContent,
    ScheduleContent,
}

impl ContentType {
    pub const ALL: [Self; 4] = [
        Self::ImageContent,
        Self::CanvasContent,
        Self::PlaylistContent,
        Self::ScheduleContent,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ImageContent => "imageContent",
            Self::CanvasContent => "canvasContent",
            Self::PlaylistContent => "playlistContent",
            Self::ScheduleContent => "scheduleContent",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown content type `{0}`")]
pub struct ParseContentTypeError(pub String);

impl FromStr for ContentType {
    type Err = ParseContentTypeError;

    /// Case-insensitive: `imageContent`, `IMAGECONTENT` and `imagecontent` all parse
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseContentTypeError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// How an image is fitted to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageContain {
    CropToFit,
    FitToScreen,
}

/// Image or canvas: a single media reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaContent {
    pub id: String,
    pub name: String,
    pub orientation: Orientation,
    /// Absolute URL of the media file
    pub image: String,
    pub image_contain: ImageContain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub orientation: Orientation,
    /// Seconds each item stays on screen
    pub interval: u32,
    pub playlist_content: Vec<ContentInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: String,
    pub name: String,
    pub orientation: Orientation,
    pub schedule_contents: Vec<ScheduleContent>,
}

/// One time slot of a day schedule, in fractional hours
///
/// Serialized as the slot's content descriptor with `startTime` and
/// `endTime` added alongside its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleContent {
    pub start_time: f64,
    pub end_time: f64,
    #[serde(flatten)]
    pub content: ContentInfo,
}

impl ScheduleContent {
    /// Requires `0 <= start_time < end_time <= 24`
    pub fn new(content: ContentInfo, start_time: f64, end_time: f64) -> Result<Self, ContentError> {
        let valid = (0.0..24.0).contains(&start_time) && start_time < end_time && end_time <= 24.0;
        if !valid {
            return Err(ContentError::InvalidScheduleHours {
                id: content.id().to_string(),
                start: start_time,
                end: end_time,
            });
        }
        Ok(Self {
            start_time,
            end_time,
            content,
        })
    }
}

/// Polymorphic content descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "contentType", rename_all = "camelCase")]
pub enum ContentInfo {
    ImageContent(MediaContent),
    CanvasContent(MediaContent),
    PlaylistContent(Playlist),
    ScheduleContent(Schedule),
}

impl ContentInfo {
    pub fn id(&self) -> &str {
        match self {
            Self::ImageContent(c) | Self::CanvasContent(c) => &c.id,
            Self::PlaylistContent(p) => &p.id,
            Self::ScheduleContent(s) => &s.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::ImageContent(c) | Self::CanvasContent(c) => &c.name,
            Self::PlaylistContent(p) => &p.name,
            Self::ScheduleContent(s) => &s.name,
        }
    }

    pub const fn content_type(&self) -> ContentType {
        match self {
            Self::ImageContent(_) => ContentType::ImageContent,
            Self::CanvasContent(_) => ContentType::CanvasContent,
            Self::PlaylistContent(_) => ContentType::PlaylistContent,
            Self::ScheduleContent(_) => ContentType::ScheduleContent,
        }
    }

    pub const fn orientation(&self) -> Orientation {
        match self {
            Self::ImageContent(c) | Self::CanvasContent(c) => c.orientation,
            Self::PlaylistContent(p) => p.orientation,
            Self::ScheduleContent(s) => s.orientation,
        }
    }

    /// Directly nested descriptors, in order
    pub fn children(&self) -> Vec<&Self> {
        match self {
            Self::ImageContent(_) | Self::CanvasContent(_) => Vec::new(),
            Self::PlaylistContent(p) => p.playlist_content.iter().collect(),
            Self::ScheduleContent(s) => s.schedule_contents.iter().map(|e| &e.content).collect(),
        }
    }

    /// True if any descendant carries `id`
    pub fn nests(&self, id: &str) -> bool {
        self.children()
            .into_iter()
            .any(|child| child.id() == id || child.nests(id))
    }
}
