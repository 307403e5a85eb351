//! Built-in content catalog
//!
//! Leaves are built first; playlists and schedules then embed copies of
//! them, so every descriptor is complete and self-contained.

use super::model::{
    ContentInfo, ImageContain, MediaContent, Orientation, Playlist, Schedule, ScheduleContent,
};
use crate::error::ContentError;

pub const HARBOUR_IMAGE: &str = "chuttersnap-piQY2YNDJ8k-unsplash.jpg";
pub const MOUNTAIN_IMAGE: &str = "leonard-von-bibra-hep72i867oI-unsplash.jpg";

const PLAYLIST_INTERVAL_SECS: u32 = 10;

/// Absolute URL serving `file` through the `/image?path=` route
pub fn media_url(base_url: &str, file: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(file.as_bytes()).collect();
    format!("{}/image?path={encoded}", base_url.trim_end_matches('/'))
}

fn media(
    base_url: &str,
    id: &str,
    name: &str,
    orientation: Orientation,
    file: &str,
    image_contain: ImageContain,
) -> MediaContent {
    MediaContent {
        id: id.to_string(),
        name: name.to_string(),
        orientation,
        image: media_url(base_url, file),
        image_contain,
    }
}

/// Build every catalog entry with media URLs rooted at `base_url`
pub fn build(base_url: &str) -> Result<Vec<ContentInfo>, ContentError> {
    let harbour = ContentInfo::ImageContent(media(
        base_url,
        "image_content_1",
        "Harbour at dawn",
        Orientation::Landscape,
        HARBOUR_IMAGE,
        ImageContain::CropToFit,
    ));
    let mountain = ContentInfo::ImageContent(media(
        base_url,
        "image_content_2",
        "Mountain ridge",
        Orientation::Portrait,
        MOUNTAIN_IMAGE,
        ImageContain::FitToScreen,
    ));
    let welcome = ContentInfo::CanvasContent(media(
        base_url,
        "canvas_content_1",
        "Welcome board",
        Orientation::Landscape,
        MOUNTAIN_IMAGE,
        ImageContain::FitToScreen,
    ));

    let lobby = ContentInfo::PlaylistContent(Playlist {
        id: "playlist_content_1".to_string(),
        name: "Lobby rotation".to_string(),
        orientation: Orientation::Landscape,
        interval: PLAYLIST_INTERVAL_SECS,
        playlist_content: vec![harbour.clone(), welcome.clone(), mountain.clone()],
    });

    let weekday = ContentInfo::ScheduleContent(Schedule {
        id: "schedule_content_1".to_string(),
        name: "Weekday schedule".to_string(),
        orientation: Orientation::Landscape,
        schedule_contents: vec![
            ScheduleContent::new(harbour.clone(), 0.0, 8.5)?,
            ScheduleContent::new(lobby.clone(), 8.5, 17.0)?,
            ScheduleContent::new(welcome.clone(), 17.0, 24.0)?,
        ],
    });

    Ok(vec![harbour, mountain, welcome, lobby, weekday])
}
