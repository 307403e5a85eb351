//! Media library
//!
//! Resolves media names (as used in `/image/:filename` and `/image?path=`)
//! to files under the configured media directory and reads them for
//! streaming. Names are reduced to their stem and given the default
//! extension, so `harbour`, `harbour.jpg` and `harbour.png` all resolve to
//! `harbour.jpg`.

use std::io;
use std::path::{Path, PathBuf};

use hyper::body::Bytes;

use crate::config::MediaConfig;
use crate::error::HandlerError;
use crate::http::mime::content_type_for;

/// A media file read into memory, ready to send
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub path: PathBuf,
    pub data: Bytes,
    pub content_type: &'static str,
}

/// Read-only view of the media directory
#[derive(Debug, Clone)]
pub struct MediaLibrary {
    root: PathBuf,
    default_extension: String,
}

impl MediaLibrary {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            root: PathBuf::from(&config.dir),
            default_extension: config.default_extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File a media name refers to, or `None` for names that could escape
    /// the media directory
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let stem = strip_extension(name.trim());
        if stem.is_empty() || stem.starts_with('.') || stem.contains(['/', '\\', '\0']) {
            crate::logger::log_warning(&format!("Rejected media name: {name:?}"));
            return None;
        }
        Some(self.root.join(format!("{stem}.{}", self.default_extension)))
    }

    /// Read a media file by name
    pub async fn open(&self, name: &str) -> Result<MediaFile, HandlerError> {
        let not_found = || HandlerError::MediaNotFound(name.to_string());
        let path = self.resolve(name).ok_or_else(not_found)?;

        // Only regular files are media; a directory named like one is not
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(not_found()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(HandlerError::Io(e)),
        }

        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(HandlerError::Io(e)),
        };

        Ok(MediaFile {
            content_type: content_type_for(&path),
            data: Bytes::from(data),
            path,
        })
    }

    /// Number of regular files in the media directory
    pub fn count_files(&self) -> io::Result<usize> {
        let mut count = 0;
        for entry in std::fs::read_dir(&self.root)? {
            if entry?.file_type()?.is_file() {
                count += 1;
            }
        }
        Ok(count)
    }
}

/// Drop everything from the last `.` on, keeping dot-files intact
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library(dir: &Path) -> MediaLibrary {
        MediaLibrary::new(&MediaConfig {
            dir: dir.to_string_lossy().into_owned(),
            default_extension: "jpg".to_string(),
        })
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("harbour.jpg"), "harbour");
        assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
        assert_eq!(strip_extension("harbour"), "harbour");
        assert_eq!(strip_extension(".hidden"), ".hidden");
    }

    #[test]
    fn test_resolve_assumes_default_extension() {
        let lib = library(Path::new("/srv/media"));
        assert_eq!(
            lib.resolve("harbour.png"),
            Some(PathBuf::from("/srv/media/harbour.jpg"))
        );
        assert_eq!(
            lib.resolve("harbour"),
            Some(PathBuf::from("/srv/media/harbour.jpg"))
        );
    }

    #[test]
    fn test_resolve_rejects_unsafe_names() {
        let lib = library(Path::new("/srv/media"));
        assert_eq!(lib.resolve("../secret"), None);
        assert_eq!(lib.resolve("a/b"), None);
        assert_eq!(lib.resolve("a\\b"), None);
        assert_eq!(lib.resolve("a\0b"), None);
        assert_eq!(lib.resolve(".env"), None);
        assert_eq!(lib.resolve(""), None);
    }

    #[tokio::test]
    async fn test_open_existing_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("harbour.jpg"), b"\xff\xd8jpeg").unwrap();
        let lib = library(dir.path());

        let file = lib.open("harbour.jpg").await.unwrap();
        assert_eq!(file.content_type, "image/jpeg");
        assert_eq!(&file.data[..], b"\xff\xd8jpeg");

        assert!(matches!(
            lib.open("mountain").await,
            Err(HandlerError::MediaNotFound(name)) if name == "mountain"
        ));
        assert!(matches!(
            lib.open("../harbour").await,
            Err(HandlerError::MediaNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_open_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("thumbs.jpg")).unwrap();
        let lib = library(dir.path());

        let err = lib.open("thumbs").await.unwrap_err();
        assert!(matches!(err, HandlerError::MediaNotFound(ref name) if name == "thumbs"));
        assert_eq!(err.status(), hyper::StatusCode::NOT_FOUND);
        assert!(matches!(
            lib.open("a\0b").await,
            Err(HandlerError::MediaNotFound(_))
        ));
    }

    #[test]
    fn test_count_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"a").unwrap();
        std::fs::write(dir.path().join("b.jpg"), b"b").unwrap();
        std::fs::create_dir(dir.path().join("thumbs")).unwrap();
        assert_eq!(library(dir.path()).count_files().unwrap(), 2);
        assert!(library(&dir.path().join("missing")).count_files().is_err());
    }
}
