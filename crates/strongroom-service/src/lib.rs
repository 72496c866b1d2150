//! # strongroom-service
//!
//! Service layer for Strongroom. Each component is an owned instance
//! injected into the [`DeliveryPipeline`] at construction time via `Arc`
//! references; nothing here is global.

pub mod audit;
pub mod delivery;
pub mod rate_limit;
pub mod registry;
pub mod single_flight;

pub use audit::AuditLogger;
pub use delivery::{
    ClientInfo, Delivery, DeliveryComponents, DeliveryFailure, DeliveryPipeline, DeliveryRequest,
    Disposition,
};
pub use rate_limit::RateLimiter;
pub use registry::DocumentRegistry;
pub use single_flight::SingleFlight;
