//! Fleet Console reference server
//!
//! In-memory REST backend for the fleet console.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fleet_console::{
    api,
    config::AppConfig,
    models::engine::EngineRecord,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("fleet_console={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Fleet Console server v{}", env!("CARGO_PKG_VERSION"));

    let repository = Repository::new();
    if let Some(path) = &config.seed.engines_file {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read engines file {}", path))?;
        let records: Vec<EngineRecord> =
            serde_json::from_str(&raw).with_context(|| format!("Invalid engines file {}", path))?;
        let count = repository.engines_seed(records).await?;
        tracing::info!(count, path = %path, "Engines loaded");
    }

    let services = Services::new(repository, config.auth.clone(), &config.seed.users).await?;

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };
    let app = api::router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
