use std::sync::Arc;

use clap::Parser;

use content_server::config::{AppState, Config};
use content_server::{logger, server};

/// Embedded HTTP server for display content and media
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file, with or without the `.toml` extension
    #[arg(short, long, default_value = "config")]
    config: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = Config::load_from(&cli.config)?;
    logger::init(&cfg.logging);

    // Tokio runtime, sized by `server.workers` when set
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let tls = server::load_tls_acceptor(&cfg.tls)?;
    let state = Arc::new(AppState::new(cfg)?);

    logger::log_catalog_loaded(state.catalog.len(), state.router.len());
    match state.media.count_files() {
        Ok(count) => logger::log_media_scanned(&state.media.root().display().to_string(), count),
        Err(e) => logger::log_warning(&format!(
            "Media directory {} is not readable: {e}",
            state.media.root().display()
        )),
    }

    server::start_signal_handler(state.lifecycle.clone())?;
    server::run(addr, state, tls).await?;
    Ok(())
}
