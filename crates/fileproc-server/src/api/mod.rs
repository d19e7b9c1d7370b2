//! HTTP surface: router assembly and top-level handlers

pub mod response;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::{
    future::{Future, IntoFuture},
    net::SocketAddr,
    sync::Arc,
    time::Duration,
};
use tokio::{net::TcpListener, sync::Notify};
use tower_http::compression::CompressionLayer;

use crate::config::Config;
use crate::features::{self, FeatureState, FilesState};
use crate::middleware;
use crate::storage::{FileRepository, InMemoryFileRepository};

/// Plain-text banner served at `/`
pub const ROOT_BANNER: &str = "File Processor is running. POST /api/v1/files/upload";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub features: FeatureState,
}

impl AppState {
    /// State backed by a fresh in-memory repository
    pub fn in_memory(config: &Config) -> Self {
        let repo: Arc<dyn FileRepository> = Arc::new(InMemoryFileRepository::new());
        Self::with_repository(repo, config)
    }

    pub fn with_repository(repo: Arc<dyn FileRepository>, config: &Config) -> Self {
        Self {
            features: FeatureState {
                files: FilesState::new(repo, config.upload.allowed_extensions.clone()),
            },
        }
    }
}

/// Bind to the configured address and serve until `shutdown` resolves
pub async fn serve<F>(config: Config, state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    let drain_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    serve_on(listener, create_router(state, &config), drain_timeout, shutdown).await
}

/// Serve `app` on `listener` with graceful shutdown
///
/// Once `shutdown` resolves the listener stops accepting and in-flight
/// requests get up to `drain_timeout` to finish; whatever is still open
/// after that is dropped.
pub async fn serve_on<F>(
    listener: TcpListener,
    app: Router,
    drain_timeout: Duration,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let signalled = Arc::new(Notify::new());
    let notify = Arc::clone(&signalled);

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            notify.notify_one();
        })
        .into_future();

    let deadline = async {
        signalled.notified().await;
        tokio::time::sleep(drain_timeout).await;
    };

    tokio::select! {
        result = server => result?,
        _ = deadline => {
            tracing::warn!(
                timeout_secs = drain_timeout.as_secs(),
                "Connections still open after shutdown timeout, closing them"
            );
        },
    }

    Ok(())
}

/// Create the application router with all routes and middleware
pub fn create_router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/v1", features::router(state.features))
        // Apply layers from innermost to outermost
        .layer(DefaultBodyLimit::max(config.upload.max_upload_bytes))
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
        .layer(middleware::catch_panic_layer())
}

async fn root() -> &'static str {
    ROOT_BANNER
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
