//! Route definitions for the Strongroom HTTP API.
//!
//! All routes are mounted under `/api`.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{any, get},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(document_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Private document delivery. Method filtering happens in the pipeline.
fn document_routes() -> Router<AppState> {
    Router::new().route(
        "/private/documents/{slug}",
        any(handlers::document::get_document),
    )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
