use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_api::config::{ServerConfig, DEFAULT_CATALOG_CONTAINER};
use catalog_api::router::build_app_router;
use catalog_api::state::AppState;
use catalog_core::env::{EnvError, EnvReader};
use catalog_core::error::StoreError;
use catalog_store::{BlobStoreConfig, DocumentStoreConfig, StoreBackend, Stores};

/// Reasons the server can fail before it starts accepting connections.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("Failed to initialize stores: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid HOST address '{0}'")]
    Host(String),

    #[error("Failed to bind to address: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Stores ---
    let mut env = EnvReader::process();
    let backend = StoreBackend::read(&env)?;
    let stores = match backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory stores; data is lost on restart");
            Stores::in_memory()
        }
        StoreBackend::Remote => {
            let documents = DocumentStoreConfig::read(&mut env, DEFAULT_CATALOG_CONTAINER);
            let blobs = BlobStoreConfig::read(&mut env);
            env.finish()?;
            tracing::info!(
                endpoint = %documents.endpoint,
                database = %documents.database,
                container = %documents.container,
                "Connecting to remote stores"
            );
            Stores::remote(&documents, &blobs)?
        }
    };

    // --- Router ---
    let addr = SocketAddr::new(
        config
            .host
            .parse()
            .map_err(|_| StartupError::Host(config.host.clone()))?,
        config.port,
    );
    let app = build_app_router(AppState::new(config, stores, backend));

    // --- Start server ---
    tracing::info!(%addr, store_backend = backend.name(), "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
