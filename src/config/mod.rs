// Configuration module entry point
// Loads settings from file and environment, and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::ConfigError;

// Re-export public types
pub use state::AppState;
pub use types::{
    default_server_name, Config, HttpConfig, LoggingConfig, MediaConfig, PerformanceConfig,
    ServerConfig, TlsConfig,
};

/// Prefix for environment overrides, e.g. `APP_SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "APP";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// A missing file is not an error; defaults and environment still apply
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", types::DEFAULT_HOST)?
            .set_default("server.port", 4004)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.backlog", 128)?
            .set_default("performance.shutdown_grace_period", 5)?
            .set_default("http.server_name", default_server_name())?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 52_428_800)? // 50MB
            .set_default("media.dir", types::DEFAULT_MEDIA_DIR)?
            .set_default("media.default_extension", types::DEFAULT_MEDIA_EXTENSION)?
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that deserialize but cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (&self.tls.cert_file, &self.tls.key_file) {
            (Some(_), None) => return Err(ConfigError::MissingTlsMaterial("tls.key_file")),
            (None, Some(_)) => return Err(ConfigError::MissingTlsMaterial("tls.cert_file")),
            _ => {}
        }
        self.socket_addr()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|e| ConfigError::InvalidAddress(format!("{addr}: {e}")))
    }

    /// Scheme, advertised host and port that media URLs are built from
    pub fn base_url(&self) -> String {
        let scheme = if self.tls.is_enabled() { "https" } else { "http" };
        let host = self
            .server
            .public_host
            .as_deref()
            .unwrap_or(&self.server.host);
        format!("{scheme}://{host}:{}", self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = Config::load_from("/nonexistent/content-server-config").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 4004);
        assert_eq!(config.http.max_body_size, 52_428_800);
        assert_eq!(config.logging.access_log_format, "combined");
        assert_eq!(config.media.default_extension, "jpg");
        assert!(!config.tls.is_enabled());
        assert_eq!(config.base_url(), "http://127.0.0.1:4004");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("server.toml")).unwrap();
        writeln!(
            file,
            "[server]\nhost = \"0.0.0.0\"\nport = 9000\npublic_host = \"192.168.1.10\"\n\n[media]\ndir = \"/srv/media\""
        )
        .unwrap();

        // File::with_name resolves the extension itself
        let path = dir.path().join("server");
        let config = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.media.dir, "/srv/media");
        assert_eq!(config.base_url(), "http://192.168.1.10:9000");
        assert_eq!(config.performance.read_timeout, 30);
    }

    #[test]
    fn test_tls_requires_both_files() {
        let mut config = Config::default();
        config.tls.cert_file = Some("cert.pem".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingTlsMaterial("tls.key_file"))
        ));

        config.tls.key_file = Some("key.pem".to_string());
        assert!(config.validate().is_ok());
        assert!(config.base_url().starts_with("https://"));
    }

    #[test]
    fn test_invalid_host() {
        let mut config = Config::default();
        config.server.host = "not a host".to_string();
        assert!(matches!(
            config.socket_addr(),
            Err(ConfigError::InvalidAddress(_))
        ));
    }
}
