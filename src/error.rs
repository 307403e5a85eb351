//! Error types
//!
//! Startup failures (`ConfigError`) are fatal and stop the server before it
//! accepts connections. Request failures (`RouteError`, `HandlerError`) are
//! local values mapped to HTTP status codes by the handler layer.

use hyper::StatusCode;
use thiserror::Error;

/// Invalid startup configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("rest wildcard `**` must be the final segment in `{0}`")]
    MisplacedRestWildcard(String),

    #[error("route {method} {pattern} is already registered")]
    DuplicateRoute { method: String, pattern: String },

    #[error("TLS requires both a certificate and a key file; missing {0}")]
    MissingTlsMaterial(&'static str),

    #[error("failed to load TLS material from {path}: {reason}")]
    InvalidTlsMaterial { path: String, reason: String },

    #[error("invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("content catalog is invalid: {0}")]
    Catalog(#[from] ContentError),

    #[error(transparent)]
    Load(#[from] config::ConfigError),
}

/// Router-level failure, distinct from a handler reporting missing content
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no route for {method} {path}")]
    NotFound { method: String, path: String },

    #[error("path `{0}` is not valid UTF-8 once decoded")]
    InvalidEncoding(String),
}

impl RouteError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidEncoding(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Failure raised while a matched handler runs
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("missing path parameter `{0}`")]
    MissingParameter(String),

    #[error("missing query value `{0}`")]
    MissingQuery(String),

    #[error("invalid value `{value}` for `{name}`")]
    InvalidValue { name: String, value: String },

    #[error("no {content_type} content with id `{id}`")]
    ContentNotFound { id: String, content_type: String },

    #[error("media `{0}` not found")]
    MediaNotFound(String),

    #[error("failed to read media: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl HandlerError {
    /// HTTP status reported for this failure
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) | Self::MissingQuery(_) | Self::InvalidValue { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::ContentNotFound { .. } | Self::MediaNotFound(_) => StatusCode::NOT_FOUND,
            Self::Io(_) | Self::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Violated catalog invariant
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContentError {
    #[error("duplicate content id `{0}`")]
    DuplicateId(String),

    #[error("content `{0}` contains itself")]
    SelfReference(String),

    #[error("schedule entry `{id}` has invalid hours {start}..{end}")]
    InvalidScheduleHours { id: String, start: f64, end: f64 },
}
