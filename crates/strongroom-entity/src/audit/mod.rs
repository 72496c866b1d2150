//! Download audit trail models.

pub mod event;
pub mod metadata;

pub use event::AuditEvent;
pub use metadata::ContentMetadata;
