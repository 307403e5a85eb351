// Application state module
// Everything a request needs, built once before the listener starts

use super::types::Config;
use crate::content::ContentStore;
use crate::error::ConfigError;
use crate::handler::{build_router, Endpoint};
use crate::media::MediaLibrary;
use crate::routing::Router;
use crate::server::ServerLifecycle;

/// Application state, shared read-only behind an `Arc`
pub struct AppState {
    pub config: Config,
    /// Root of every absolute URL the server hands out
    pub base_url: String,
    pub router: Router<Endpoint>,
    pub catalog: ContentStore,
    pub media: MediaLibrary,
    pub lifecycle: ServerLifecycle,

    // Cached config values for fast access
    pub access_log: bool,
}

impl AppState {
    /// Build the route table and content catalog for `config`
    ///
    /// Fails on an invalid route table or catalog; either is fatal.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let base_url = config.base_url();
        let router = build_router()?;
        let catalog = ContentStore::initialize(&base_url)?;
        let media = MediaLibrary::new(&config.media);

        Ok(Self {
            access_log: config.logging.access_log,
            config,
            base_url,
            router,
            catalog,
            media,
            lifecycle: ServerLifecycle::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_defaults() {
        let state = AppState::new(Config::default()).unwrap();
        assert_eq!(state.base_url, "http://127.0.0.1:4004");
        assert!(!state.router.is_empty());
        assert_eq!(state.catalog.len(), 5);
        assert!(state.access_log);
    }

    #[test]
    fn test_catalog_uses_public_host() {
        let mut config = Config::default();
        config.server.public_host = Some("192.168.1.10".to_string());
        let state = AppState::new(config).unwrap();
        let image = state
            .catalog
            .lookup("image_content_1", crate::content::ContentType::ImageContent)
            .unwrap();
        let json = serde_json::to_value(image).unwrap();
        assert!(json["image"]
            .as_str()
            .unwrap()
            .starts_with("http://192.168.1.10:4004/image?path="));
    }
}
