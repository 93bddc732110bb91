//! Celestial Watch HTTP Server Binary
//!
//! This is the main entry point for the REST API server.
//! It loads configuration, creates the repository, sets up the HTTP router,
//! and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the in-memory repository (default)
//! cargo run --bin celestial-server
//!
//! # Override settings from the environment
//! PORT=8080 SCORING_POLICY=continuous cargo run --bin celestial-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 3001)
//! - `ALLOWED_ORIGINS`: Comma-separated CORS origins
//! - `MAX_IMAGE_SIZE_MB`: Upload ceiling for photo analysis (default: 10)
//! - `SCORING_POLICY`: `additive` (default) or `continuous`
//! - `REPOSITORY_TYPE`: `local` (default)
//! - `MAX_SESSIONS`: Session records kept in memory (default: 10000)
//! - `RUST_LOG`: Log level (default: info)
//!
//! Settings not given in the environment are read from `celestial.toml`
//! when one exists.

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use celestial_watch::config::AppConfig;
use celestial_watch::db::RepositoryFactory;
use celestial_watch::http::{create_router, AppState};

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
        .with_thread_ids(true)
        .init();

    info!("Starting Celestial Watch HTTP Server");

    let config = AppConfig::load()?;
    info!(
        "Scoring policy: {}, max upload: {}MB",
        config.scoring.policy, config.analysis.max_image_size_mb
    );

    let repository = RepositoryFactory::create(
        config.repository.repo_type,
        config.repository.max_sessions,
    )?;
    info!(
        "Repository initialized ({}, max {} sessions)",
        repository.backend_name(),
        config.repository.max_sessions
    );

    let addr: SocketAddr = config.bind_address().parse()?;
    if config.server.allowed_origins.is_empty() {
        info!("CORS: any origin");
    } else {
        info!("CORS: {}", config.server.allowed_origins.join(", "));
    }

    // Create router with all endpoints
    let app = create_router(AppState::new(repository, config));

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
