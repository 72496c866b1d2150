//! Fire-and-forget audit logging.

pub mod logger;

pub use logger::AuditLogger;
