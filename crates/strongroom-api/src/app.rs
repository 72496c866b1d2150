//! Application builder and HTTP server lifecycle.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

use strongroom_core::config::app::ServerConfig;
use strongroom_core::error::{AppError, ErrorKind};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Serves `app` until `shutdown` flips to `true`, then drains in-flight
/// requests.
pub async fn serve(
    app: Router,
    config: &ServerConfig,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;

    info!("Strongroom server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        while !*shutdown.borrow_and_update() {
            if shutdown.changed().await.is_err() {
                break;
            }
        }
    })
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))
}
