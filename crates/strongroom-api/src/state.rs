//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use strongroom_core::config::AppConfig;
use strongroom_core::traits::AssetStore;
use strongroom_service::DeliveryPipeline;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// The private document delivery pipeline
    pub pipeline: Arc<DeliveryPipeline>,
    /// Asset store, for health reporting
    pub store: Arc<dyn AssetStore>,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Creates the state.
    pub fn new(
        config: Arc<AppConfig>,
        pipeline: Arc<DeliveryPipeline>,
        store: Arc<dyn AssetStore>,
    ) -> Self {
        Self {
            config,
            pipeline,
            store,
            started_at: Instant::now(),
        }
    }

    /// Whether internal error detail may be echoed to clients.
    pub fn development_mode(&self) -> bool {
        self.config.delivery.development_mode
    }
}
