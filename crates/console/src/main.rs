//! `catalog-console` -- browser console for the catalog API.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                     |
//! |------------------------|----------|-----------------------------|
//! | `CONSOLE_HOST`         | no       | `0.0.0.0`                   |
//! | `CONSOLE_PORT`         | no       | `8501`                      |
//! | `CATALOG_API_BASE_URL` | no       | `http://localhost:3000/api` |

use std::net::{IpAddr, SocketAddr};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_console::client::CatalogApiClient;
use catalog_console::config::ConsoleConfig;
use catalog_console::routes::{build_console_router, ConsoleState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_console=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ConsoleConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid console configuration");
        std::process::exit(1);
    });

    let host: IpAddr = config.host.parse().unwrap_or_else(|_| {
        tracing::error!(host = %config.host, "CONSOLE_HOST must be an IP address");
        std::process::exit(1);
    });
    let addr = SocketAddr::new(host, config.port);

    let state = ConsoleState {
        api: CatalogApiClient::new(config.api_base_url.clone()),
    };
    let app = build_console_router(state);

    tracing::info!(%addr, api_base_url = %config.api_base_url, "Starting catalog console");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind to address");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Received SIGINT (Ctrl-C), shutting down");
        })
        .await
    {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
