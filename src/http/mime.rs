//! MIME type detection for served media

use std::path::Path;

/// Content-Type for a media file, inferred from its extension
///
/// # Examples
/// ```
/// use std::path::Path;
/// use content_server::http::mime::content_type_for;
/// assert_eq!(content_type_for(Path::new("harbour.JPG")), "image/jpeg");
/// assert_eq!(content_type_for(Path::new("clip.mp4")), "video/mp4");
/// assert_eq!(content_type_for(Path::new("README")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",

        Some("mp4" | "m4v") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",

        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",

        _ => "application/octet-stream",
    }
}
