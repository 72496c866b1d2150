//! In-process audit sink.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use strongroom_core::{AppError, AppResult};
use strongroom_entity::{AuditEvent, ContentMetadata};

use crate::sink::AuditSink;

#[derive(Debug, Default)]
struct Inner {
    events: Mutex<Vec<AuditEvent>>,
    metadata: Mutex<HashMap<String, ContentMetadata>>,
    failing: AtomicBool,
}

/// Audit sink keeping everything in memory, with the same upsert semantics
/// as the PostgreSQL repository.
///
/// Cloning shares the underlying storage. Writes can be made to fail with
/// [`MemoryAuditStore::set_failing`].
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditStore {
    inner: Arc<Inner>,
}

impl MemoryAuditStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of all recorded events, in write order.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.inner
            .events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Counter record for a slug.
    pub fn metadata(&self, slug: &str) -> Option<ContentMetadata> {
        self.inner
            .metadata
            .lock()
            .ok()
            .and_then(|map| map.get(slug).cloned())
    }

    /// Number of distinct slugs with a counter record.
    pub fn metadata_count(&self) -> usize {
        self.inner.metadata.lock().map(|map| map.len()).unwrap_or(0)
    }

    fn check_available(&self) -> AppResult<()> {
        if self.inner.failing.load(Ordering::SeqCst) {
            Err(AppError::database("Audit store unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AuditSink for MemoryAuditStore {
    fn backend(&self) -> &str {
        "memory"
    }

    async fn write_event(&self, event: &AuditEvent) -> AppResult<()> {
        self.check_available()?;
        self.inner
            .events
            .lock()
            .map_err(|_| AppError::internal("Audit event lock poisoned"))?
            .push(event.clone());
        Ok(())
    }

    async fn bump_metadata(&self, slug: &str, at: DateTime<Utc>) -> AppResult<ContentMetadata> {
        self.check_available()?;
        let mut map = self
            .inner
            .metadata
            .lock()
            .map_err(|_| AppError::internal("Content metadata lock poisoned"))?;
        let record = map
            .entry(slug.to_string())
            .and_modify(|m| m.increment(at))
            .or_insert_with(|| ContentMetadata::first_download(slug, at));
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strongroom_core::error::ErrorKind;

    #[tokio::test]
    async fn test_bump_twice_yields_one_record() {
        let store = MemoryAuditStore::new();
        let first = Utc::now();
        store.bump_metadata("board-playbook", first).await.unwrap();
        let second = store.bump_metadata("board-playbook", Utc::now()).await.unwrap();

        assert_eq!(second.total_downloads, 2);
        assert_eq!(second.created_at, first);
        assert_eq!(store.metadata_count(), 1);
        assert_eq!(store.metadata("board-playbook").unwrap().total_downloads, 2);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = MemoryAuditStore::new();
        store.set_failing(true);
        let err = store
            .write_event(&AuditEvent::new("x", 200))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
        assert!(store.events().is_empty());

        store.set_failing(false);
        store.write_event(&AuditEvent::new("x", 200)).await.unwrap();
        assert_eq!(store.events().len(), 1);
    }
}
