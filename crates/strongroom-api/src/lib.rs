//! # strongroom-api
//!
//! HTTP API layer for Strongroom built on Axum.
//!
//! Provides the private document endpoint and health check, the client
//! metadata and credential extractors, the failure → HTTP mapping, and the
//! request logging middleware.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod headers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use state::AppState;
