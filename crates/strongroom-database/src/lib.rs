//! # strongroom-database
//!
//! PostgreSQL connection management, migrations, and the audit sinks the
//! delivery path writes to.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod sink;

pub use connection::DatabasePool;
pub use memory::MemoryAuditStore;
pub use repositories::audit::PgAuditRepository;
pub use sink::AuditSink;
