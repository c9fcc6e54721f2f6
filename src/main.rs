use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use linkmeter::args::Args;
use linkmeter::constants::{SHUTDOWN_GRACE, WINDOW};
use linkmeter::server::AppState;
use linkmeter::{
    load_config_with_fallback, DeviceFilter, NetDevProvider, QueryEngine, RingStore, Sampler,
};

fn main() -> Result<()> {
    linkmeter::logging::init();

    let args = Args::parse();

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    rt.block_on(run(args))
}

async fn run(args: Args) -> Result<()> {
    let mut config = load_config_with_fallback(&args.config)?;
    args.apply(&mut config);

    // Configuration errors are fatal before anything starts serving.
    let filter = DeviceFilter::new(
        config.ignore_pattern.as_deref(),
        config.accept_pattern.as_deref(),
    )
    .context("invalid device filter pattern")?;

    let ring = Arc::new(RingStore::new(WINDOW));
    let provider = Arc::new(NetDevProvider::new(filter));
    let sampler = Sampler::new(provider, Arc::clone(&ring), config.device.clone());

    // Priming precedes the listener bind: a failed first fetch means the
    // server never becomes reachable.
    sampler
        .prime()
        .with_context(|| format!("priming fetch failed for device '{}'", config.device))?;

    let shutdown = CancellationToken::new();

    let sampler_shutdown = shutdown.clone();
    let mut sampler_task = tokio::spawn(async move { sampler.run(sampler_shutdown).await });

    let listener = TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    info!(
        "monitoring {} on http://{}",
        config.device,
        listener.local_addr()?
    );

    let state = AppState {
        query: Arc::new(QueryEngine::new(ring)),
    };
    let server_shutdown = shutdown.clone();
    let server_task = tokio::spawn(linkmeter::server::run(listener, state, server_shutdown));

    let result = tokio::select! {
        _ = shutdown_signal() => {
            info!("shutdown signal received");
            Ok(())
        }
        res = &mut sampler_task => {
            let err = match res {
                Ok(Ok(())) => anyhow::anyhow!("sampling loop exited unexpectedly"),
                Ok(Err(e)) => anyhow::Error::new(e).context("sampling loop failed"),
                Err(e) => anyhow::Error::new(e).context("sampling loop panicked"),
            };
            error!("{:#}", err);
            Err(err)
        }
    };

    // Fan out cancellation, then give in-flight reads a grace period. The
    // sampling loop is not joined: it observes cancellation within one
    // tick period.
    shutdown.cancel();
    if let Ok(Ok(Err(e))) = tokio::time::timeout(SHUTDOWN_GRACE, server_task).await {
        error!("http server error during shutdown: {}", e);
    }

    info!("done");
    result
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
