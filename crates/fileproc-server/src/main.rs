//! File Processor Server - Main entry point

use anyhow::Result;
use fileproc_common::logging::{init_logging, LogConfig};
use tokio::signal;
use tracing::info;

use fileproc_server::{api, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Environment variables take precedence over these defaults
    let log_config = LogConfig::builder()
        .log_file_prefix("fileproc-server")
        .filter_directives("fileproc_server=debug,tower_http=debug,axum=info")
        .build();
    let log_config = LogConfig::from_env_or(log_config)?;

    let _guard = init_logging(&log_config)?;

    info!("Starting File Processor Server");

    let config = Config::load()?;
    info!(
        host = %config.server.host,
        port = config.server.port,
        allowed = %config.upload.allowed_extensions,
        max_upload_bytes = config.upload.max_upload_bytes,
        "Configuration loaded"
    );

    let state = api::AppState::in_memory(&config);
    api::serve(config, state, shutdown_signal()).await?;

    info!("Server shut down gracefully");

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
