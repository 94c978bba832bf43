//! # Tally API
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Client ───► HTTP (8080) ───► rule engine ───► points store           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use tally_api::cli::Cli;
use tally_api::{create_router, logging, ApiConfig, ApiKeySet, AppState, AuthConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ApiConfig::load()?.with_cli(&cli)?;

    logging::init_tracing(config.debug, config.log_file.as_deref());
    info!("Starting Tally API server...");

    if config.debug {
        info!("Running in debug mode, scoring details will be logged");
    }

    let auth = if config.auth_enabled {
        AuthConfig::with_keys(ApiKeySet::from_keys(&config.api_keys))
    } else {
        warn!("Running in noauth mode, API keys will not be validated");
        AuthConfig::disabled()
    };

    let app = create_router(AppState::in_memory(auth));

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(addr = %listener.local_addr()?, "Server is ready to handle requests");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
