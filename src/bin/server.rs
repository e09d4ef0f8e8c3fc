//! Storewatch HTTP Server Binary
//!
//! This is the main entry point for the storewatch REST API server.
//! It loads configuration, sets up the in-memory repository and HTTP
//! router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin storewatch-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (overrides storewatch.toml)
//! - `PORT`: Server port (overrides storewatch.toml)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use storewatch::config::ServiceConfig;
use storewatch::db::{FullRepository, LocalRepository};
use storewatch::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting storewatch HTTP server");

    // Load configuration (built-in defaults when no storewatch.toml exists)
    let config = ServiceConfig::from_default_location()
        .map_err(|e| anyhow::anyhow!("configuration error: {}", e))?;

    let repository: Arc<dyn FullRepository> = Arc::new(LocalRepository::new());
    info!("Repository initialized successfully");

    // Determine bind address (env vars override the config file)
    let host = env::var("HOST").unwrap_or_else(|_| config.server.host.clone());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    // Create application state and router
    let state = AppState::new(repository, config);
    let app = create_router(state);

    info!("Server listening on http://{}", addr);
    info!("API documentation: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
