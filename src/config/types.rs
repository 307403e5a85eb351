// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4004;
pub const DEFAULT_MAX_BODY_SIZE: u64 = 52_428_800; // 50MB
pub const DEFAULT_MEDIA_DIR: &str = "media";
pub const DEFAULT_MEDIA_EXTENSION: &str = "jpg";

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub tls: TlsConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub media: MediaConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Host advertised in absolute URLs when it differs from the bind host
    #[serde(default)]
    pub public_host: Option<String>,
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            public_host: None,
            workers: None,
        }
    }
}

/// PEM certificate chain and private key; plaintext when both are absent
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TlsConfig {
    #[serde(default)]
    pub cert_file: Option<String>,
    #[serde(default)]
    pub key_file: Option<String>,
}

impl TlsConfig {
    pub const fn is_enabled(&self) -> bool {
        self.cert_file.is_some() || self.key_file.is_some()
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
    /// Access log format (combined, common or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            access_log: true,
            show_headers: false,
            access_log_format: default_access_log_format(),
        }
    }
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    #[serde(default)]
    pub max_connections: Option<u64>,
    pub backlog: i32,
    /// Seconds in-flight connections get after a stop request
    pub shutdown_grace_period: u64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            keep_alive_timeout: 75,
            read_timeout: 30,
            write_timeout: 30,
            max_connections: None,
            backlog: 128,
            shutdown_grace_period: 5,
        }
    }
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    pub max_body_size: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            server_name: default_server_name(),
            enable_cors: false,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}

pub fn default_server_name() -> String {
    format!("content-server/{}", env!("CARGO_PKG_VERSION"))
}

/// Media library configuration
#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    /// Directory holding the streamable files
    pub dir: String,
    /// Extension appended to extension-less media names
    pub default_extension: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_MEDIA_DIR.to_string(),
            default_extension: DEFAULT_MEDIA_EXTENSION.to_string(),
        }
    }
}
