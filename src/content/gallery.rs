//! Image gallery listing served by `/images`

use serde::Serialize;

use super::catalog::{HARBOUR_IMAGE, MOUNTAIN_IMAGE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryEntry {
    pub name: String,
    pub url: String,
    pub content_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<GalleryEntry>>,
}

impl GalleryEntry {
    fn photo(name: &str, image_base: &str) -> Self {
        Self {
            name: name.to_string(),
            url: format!("{image_base}{name}"),
            content_type: "text",
            images: None,
        }
    }
}

/// Fixed listing; photo URLs point at `/image/<name>` under `base_url`
pub fn listing(base_url: &str) -> Vec<GalleryEntry> {
    let base_url = base_url.trim_end_matches('/');
    let image_base = format!("{base_url}/image/");
    let photos = vec![
        GalleryEntry::photo(HARBOUR_IMAGE, &image_base),
        GalleryEntry::photo(MOUNTAIN_IMAGE, &image_base),
    ];
    let album = GalleryEntry {
        name: "unsplash".to_string(),
        url: format!("{base_url}/images"),
        content_type: "text",
        images: Some(photos.clone()),
    };

    let mut listing = photos;
    listing.push(album);
    listing
}
