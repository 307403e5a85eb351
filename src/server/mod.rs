// Server module entry point
// Binding, the accept loop, graceful shutdown and the lifecycle they drive

pub mod connection;
pub mod lifecycle;
pub mod listener;
pub mod signal;
pub mod tls;

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

use crate::config::AppState;
use crate::logger;

pub use lifecycle::{LifecycleError, LifecycleState, ServerLifecycle};
pub use listener::create_listener;
pub use signal::start_signal_handler;
pub use tls::load_tls_acceptor;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Bind and serve until a stop is requested
pub async fn run(
    addr: SocketAddr,
    state: Arc<AppState>,
    tls: Option<TlsAcceptor>,
) -> std::io::Result<()> {
    let listener = bind(addr, &state)?;
    serve(listener, state, tls).await
}

/// Move to `starting` and bind the listener; a failed bind returns the
/// server to `stopped`
pub fn bind(addr: SocketAddr, state: &AppState) -> std::io::Result<TcpListener> {
    state
        .lifecycle
        .transition(LifecycleState::Starting)
        .map_err(std::io::Error::other)?;

    match create_listener(addr, state.config.performance.backlog) {
        Ok(listener) => Ok(listener),
        Err(e) => {
            logger::log_bind_failed(&addr, &e);
            // starting -> stopped is always allowed
            let _ = state.lifecycle.transition(LifecycleState::Stopped);
            Err(e)
        }
    }
}

/// Accept connections until a stop is requested, then give in-flight
/// connections the configured grace period and move to `stopped`
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    tls: Option<TlsAcceptor>,
) -> std::io::Result<()> {
    let local_addr = listener.local_addr()?;
    let active_connections = Arc::new(AtomicUsize::new(0));

    // A stop may already have been requested while starting
    if state.lifecycle.transition(LifecycleState::Running).is_ok() {
        logger::log_server_start(&local_addr, &state.config, &state.base_url);
        accept_loop(&listener, &state, &active_connections, tls.as_ref()).await;
    }
    drop(listener);

    drain(&active_connections, state.config.performance.shutdown_grace_period).await;
    state
        .lifecycle
        .transition(LifecycleState::Stopped)
        .map_err(std::io::Error::other)
}

async fn accept_loop(
    listener: &TcpListener,
    state: &Arc<AppState>,
    active_connections: &Arc<AtomicUsize>,
    tls: Option<&TlsAcceptor>,
) {
    let lifecycle = state.lifecycle.clone();
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(stream, peer_addr, state, active_connections, tls);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }
            () = lifecycle.stop_requested() => break,
        }
    }
}

/// Wait until every connection task has finished or the grace period ends
async fn drain(active_connections: &AtomicUsize, grace_secs: u64) {
    let active = active_connections.load(Ordering::SeqCst);
    if active == 0 {
        return;
    }
    logger::log_draining(active, grace_secs);

    let deadline = tokio::time::Instant::now() + Duration::from_secs(grace_secs);
    while active_connections.load(Ordering::SeqCst) > 0 {
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Grace period over with {} connections still open",
                active_connections.load(Ordering::SeqCst)
            ));
            break;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
