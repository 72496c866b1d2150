//! Audit sink trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use strongroom_core::AppResult;
use strongroom_entity::{AuditEvent, ContentMetadata};

/// Durable destination for download audit records.
#[async_trait]
pub trait AuditSink: Send + Sync + std::fmt::Debug {
    /// Return the backend name (e.g., "postgres").
    fn backend(&self) -> &str;

    /// Persist one audit event.
    async fn write_event(&self, event: &AuditEvent) -> AppResult<()>;

    /// Atomically create-or-increment the download counter for `slug`.
    async fn bump_metadata(&self, slug: &str, at: DateTime<Utc>) -> AppResult<ContentMetadata>;
}
