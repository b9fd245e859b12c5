//! aidet-server library interface for testing
//!
//! Exposes public APIs for integration testing

pub mod api;
pub mod config;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::config::ServiceConfig;
use crate::services::sightengine_client::SightengineClient;

/// Maximum accepted upload size (10 MiB), enforced at the transport
/// layer before the handler runs
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Immutable service configuration, resolved once at startup
    pub config: Arc<ServiceConfig>,
    /// Vendor API client (clones share one connection pool)
    pub analyzer: SightengineClient,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last detection failure for diagnostics
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        let analyzer = SightengineClient::new(config.endpoint_url.clone(), config.models.clone());
        Self {
            config: Arc::new(config),
            analyzer,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // UI route (embedded HTML page)
        .merge(api::ui_routes())
        // API routes
        .merge(api::detect_routes())
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
