//! aidet-server - AI Content Detection Relay Service
//!
//! Accepts image/video uploads over HTTP, relays them to the
//! Sightengine content-analysis API, and returns a normalized
//! `{isAIGenerated, confidence, details}` verdict. Performs no
//! analysis of its own.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

use aidet_common::config::TomlConfig;
use aidet_server::config::ServiceConfig;
use aidet_server::AppState;

#[derive(Parser, Debug)]
#[command(name = "aidet-server", version, about = "AI content detection relay service")]
struct Args {
    /// HTTP listen port (overrides environment and config file)
    #[arg(long)]
    port: Option<u16>,

    /// Path to TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting aidet-server v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let toml_config = match &args.config {
        Some(path) => TomlConfig::load(path)?,
        None => TomlConfig::load_default()?,
    };

    let config = ServiceConfig::resolve(args.port, &toml_config);
    info!("Vendor endpoint: {}", config.endpoint_url);
    info!("Vendor models: {}", config.models);
    if config.credentials().is_none() {
        warn!(
            "Vendor API credentials not configured; \
             /api/detect will fail until SIGHTENGINE_API_USER and SIGHTENGINE_API_SECRET are set"
        );
    }

    let port = config.port;
    let state = AppState::new(config);
    let app = aidet_server::build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Listening on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
