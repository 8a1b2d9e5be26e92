//! Aircraft Proxy - Entry Point
//!
//! Starts the API server with graceful shutdown support.

use std::sync::Arc;

use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aircraft_proxy::api::{ApiServer, AppState};
use aircraft_proxy::config::LogConfig;
use aircraft_proxy::{AircraftClient, Config, EnvCredentials, ProxyError};

#[tokio::main]
async fn main() -> aircraft_proxy::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    init_tracing(&config.log);
    info!("Starting Aircraft Proxy");

    let client = AircraftClient::new(&config.upstream)?;
    info!(
        "Upstream endpoint: {} (timeout: {:?})",
        client.url(),
        config.upstream.timeout
    );

    let state = AppState::new(client, Arc::new(EnvCredentials));
    let api_server = ApiServer::new(config.server.clone(), state);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let mut api_task = tokio::spawn(async move { api_server.run(shutdown_rx).await });

    info!("Server started on {}", config.server_addr());

    // Wait for shutdown signal, or for the server to stop on its own
    tokio::select! {
        _ = shutdown_signal() => info!("Shutdown signal received"),
        joined = &mut api_task => return server_outcome(joined),
    }

    let _ = shutdown_tx.send(true);
    server_outcome(api_task.await)?;

    info!("Aircraft Proxy stopped");
    Ok(())
}

fn server_outcome(
    joined: std::result::Result<aircraft_proxy::Result<()>, tokio::task::JoinError>,
) -> aircraft_proxy::Result<()> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            error!("API server error: {}", e);
            Err(e)
        }
        Err(e) => Err(ProxyError::Internal(format!("API server task failed: {}", e))),
    }
}

/// Install the global subscriber, honouring `RUST_LOG` over `LOG_LEVEL`
fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("aircraft_proxy={},tower_http=debug", log.level))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if log.format.eq_ignore_ascii_case("json") {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
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
