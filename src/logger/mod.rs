//! Logger module
//!
//! Named logging helpers for the server:
//! - Server lifecycle logging
//! - Access logging in several formats
//! - Error and warning logging
//!
//! Output goes through `tracing`; `init` installs a `fmt` subscriber whose
//! filter comes from `RUST_LOG` or, when unset, `logging.level`.

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LoggingConfig};
use crate::server::LifecycleState;

/// Install the global subscriber
///
/// Should be called once at application startup. A second call is a no-op.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Err only when a subscriber is already installed (tests, embedding)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, base_url: &str) {
    tracing::info!("======================================");
    tracing::info!("Content server started");
    tracing::info!("Listening on: {addr}");
    tracing::info!("Advertised base URL: {base_url}");
    tracing::info!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        tracing::info!("Worker threads: {workers}");
    }
    if config.tls.is_enabled() {
        tracing::info!("TLS: enabled");
    }
    tracing::info!("======================================");
}

pub fn log_catalog_loaded(entries: usize, routes: usize) {
    tracing::info!("[Startup] {entries} content items, {routes} routes registered");
}

pub fn log_media_scanned(dir: &str, count: usize) {
    tracing::info!("[Startup] {count} media files available in {dir}");
}

pub fn log_state_change(from: LifecycleState, to: LifecycleState) {
    tracing::info!("[Lifecycle] {from} -> {to}");
}

pub fn log_shutdown_signal(signal: &str) {
    tracing::info!("[Signal] Received {signal}, stopping server");
}

pub fn log_draining(active: usize, grace_secs: u64) {
    tracing::info!("[Shutdown] Waiting up to {grace_secs}s for {active} connections");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

pub fn log_handler_error(method: &str, path: &str, error: &crate::error::HandlerError) {
    tracing::warn!("[Handler] {method} {path}: {error}");
}

pub fn log_headers_count(count: usize, show: bool) {
    if show {
        tracing::info!("[Headers] Count: {count}");
    }
}

/// Write a formatted access log line on the `access` target
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: "access", "{}", entry.format(format));
}

pub fn log_bind_failed(addr: &SocketAddr, err: &std::io::Error) {
    log_error(&format!("Failed to bind {addr}: {err}"));
}

pub fn log_route_miss(err: &crate::error::RouteError) {
    tracing::debug!("[Router] {err}");
}
