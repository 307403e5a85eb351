// Signal handling module
//
// SIGTERM and SIGINT (Ctrl+C elsewhere) request a graceful stop through the
// server lifecycle.

use super::lifecycle::ServerLifecycle;
use crate::logger;

/// Spawn a task that turns the first shutdown signal into a stop request
#[cfg(unix)]
pub fn start_signal_handler(lifecycle: ServerLifecycle) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::spawn(async move {
        let name = tokio::select! {
            _ = sigterm.recv() => "SIGTERM",
            _ = sigint.recv() => "SIGINT",
        };
        logger::log_shutdown_signal(name);
        lifecycle.request_stop();
    });
    Ok(())
}

/// Spawn a task that turns Ctrl+C into a stop request
#[cfg(not(unix))]
pub fn start_signal_handler(lifecycle: ServerLifecycle) -> std::io::Result<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                logger::log_shutdown_signal("Ctrl+C");
                lifecycle.request_stop();
            }
            Err(e) => logger::log_error(&format!("Failed to listen for Ctrl+C: {e}")),
        }
    });
    Ok(())
}
