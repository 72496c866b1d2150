//! # strongroom-entity
//!
//! Domain models for Strongroom: the tier ladder, per-request access
//! context, document descriptors, authorization decisions, audit records
//! and rate-limit records. Persisted records additionally derive
//! `sqlx::FromRow`.

pub mod access;
pub mod audit;
pub mod rate_limit;

pub use access::{AccessContext, AccessControlledDocument, Decision, ReasonCode, Tier};
pub use audit::{AuditEvent, ContentMetadata};
pub use rate_limit::RateLimitRecord;
