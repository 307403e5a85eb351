// Connection module
// Accepts a single TCP connection, optionally wraps it in TLS, and serves it

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_rustls::TlsAcceptor;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Accept and process a connection, checking limits and logging.
///
/// The connection counter is incremented here and decremented when the
/// spawned task finishes, so it always reflects live connections.
pub fn accept_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    conn_counter: &Arc<AtomicUsize>,
    tls: Option<&TlsAcceptor>,
) {
    // Increment counter first, then check limit
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection rejected."
            ));
            drop(stream);
            return;
        }
    }

    if state.access_log {
        logger::log_connection_accepted(&peer_addr);
    }

    let state = Arc::clone(state);
    let conn_counter = Arc::clone(conn_counter);
    let tls = tls.cloned();

    tokio::spawn(async move {
        let timeout = connection_timeout(&state);
        match tls {
            Some(acceptor) => match tokio::time::timeout(timeout, acceptor.accept(stream)).await {
                Ok(Ok(tls_stream)) => serve(tls_stream, peer_addr, state).await,
                Ok(Err(e)) => logger::log_warning(&format!("TLS handshake with {peer_addr} failed: {e}")),
                Err(_) => logger::log_warning(&format!("TLS handshake with {peer_addr} timed out")),
            },
            None => serve(stream, peer_addr, state).await,
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}

/// Serve HTTP/1.1 on an accepted stream until the client leaves, the
/// timeout expires, or a stop request lets the connection wind down
async fn serve<I>(io: I, peer_addr: SocketAddr, state: Arc<AppState>)
where
    I: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let timeout = connection_timeout(&state);
    let lifecycle = state.lifecycle.clone();

    let mut builder = http1::Builder::new();
    builder.keep_alive(state.config.performance.keep_alive_timeout > 0);

    let service_state = Arc::clone(&state);
    let conn = builder.serve_connection(
        TokioIo::new(io),
        service_fn(move |req| handler::handle_request(req, Arc::clone(&service_state), peer_addr)),
    );
    tokio::pin!(conn);

    let serve_until_done = async {
        let mut stopping = false;
        loop {
            tokio::select! {
                result = conn.as_mut() => break result,
                () = lifecycle.stop_requested(), if !stopping => {
                    conn.as_mut().graceful_shutdown();
                    stopping = true;
                }
            }
        }
    };

    match tokio::time::timeout(timeout, serve_until_done).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => logger::log_connection_error(&err),
        Err(_) => {
            logger::log_warning(&format!(
                "Connection from {peer_addr} timed out after {} seconds",
                timeout.as_secs()
            ));
        }
    }
}

fn connection_timeout(state: &AppState) -> Duration {
    let performance = &state.config.performance;
    Duration::from_secs(std::cmp::max(
        performance.read_timeout,
        performance.write_timeout,
    ))
}
