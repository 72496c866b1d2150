//! Audit queue and its background writer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use strongroom_database::AuditSink;
use strongroom_entity::AuditEvent;

#[derive(Debug)]
enum AuditCommand {
    Event(Box<AuditEvent>),
    BumpMetadata { slug: String, at: DateTime<Utc> },
    Flush(oneshot::Sender<()>),
    Shutdown,
}

/// Accepts audit records without blocking the caller and writes them to an
/// [`AuditSink`] from a single background task.
///
/// A full queue drops the record with a warning. Sink failures are logged
/// and never reach the caller.
#[derive(Debug)]
pub struct AuditLogger {
    tx: mpsc::Sender<AuditCommand>,
    worker: Mutex<Option<JoinHandle<()>>>,
    dropped: AtomicU64,
}

impl AuditLogger {
    /// Starts the writer task over `sink` with a queue of `capacity` records.
    pub fn spawn(sink: Arc<dyn AuditSink>, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        info!(backend = sink.backend(), capacity, "Audit logger started");
        let worker = tokio::spawn(run_writer(sink, rx));
        Self {
            tx,
            worker: Mutex::new(Some(worker)),
            dropped: AtomicU64::new(0),
        }
    }

    /// Queues an audit event.
    pub fn record(&self, event: AuditEvent) {
        self.enqueue(AuditCommand::Event(Box::new(event)));
    }

    /// Queues a download-counter increment for `slug`.
    pub fn bump_metadata(&self, slug: &str) {
        self.enqueue(AuditCommand::BumpMetadata {
            slug: slug.to_string(),
            at: Utc::now(),
        });
    }

    /// Waits until everything queued before this call has been processed.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(AuditCommand::Flush(ack_tx)).await.is_ok() {
            let _ = ack_rx.await;
        }
    }

    /// Drains the queue and stops the writer. Later records are dropped.
    pub async fn shutdown(&self) {
        let _ = self.tx.send(AuditCommand::Shutdown).await;
        let handle = self
            .worker
            .lock()
            .ok()
            .and_then(|mut worker| worker.take());
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                error!(error = %e, "Audit writer task failed");
            }
        }
    }

    /// Records dropped because the queue was full or closed.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn enqueue(&self, command: AuditCommand) {
        match self.tx.try_send(command) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                warn!("Audit queue full, dropping record");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                debug!("Audit logger stopped, dropping record");
            }
        }
    }
}

async fn run_writer(sink: Arc<dyn AuditSink>, mut rx: mpsc::Receiver<AuditCommand>) {
    while let Some(command) = rx.recv().await {
        match command {
            AuditCommand::Event(event) => {
                if let Err(e) = sink.write_event(&event).await {
                    error!(
                        slug = %event.slug,
                        status = event.status_code,
                        error = %e,
                        "Failed to write audit event"
                    );
                }
            }
            AuditCommand::BumpMetadata { slug, at } => {
                match sink.bump_metadata(&slug, at).await {
                    Ok(meta) => debug!(slug = %slug, total = meta.total_downloads, "Download counted"),
                    Err(e) => error!(slug = %slug, error = %e, "Failed to bump content metadata"),
                }
            }
            AuditCommand::Flush(ack) => {
                let _ = ack.send(());
            }
            AuditCommand::Shutdown => break,
        }
    }
    info!("Audit logger stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use strongroom_database::MemoryAuditStore;

    #[tokio::test]
    async fn test_records_reach_sink_after_flush() {
        let store = MemoryAuditStore::new();
        let logger = AuditLogger::spawn(Arc::new(store.clone()), 16);

        logger.record(AuditEvent::new("board-playbook", 200).delivered("b.pdf", 3, "abc"));
        logger.bump_metadata("board-playbook");
        logger.bump_metadata("board-playbook");
        logger.flush().await;

        assert_eq!(store.events().len(), 1);
        assert_eq!(store.metadata("board-playbook").unwrap().total_downloads, 2);
        assert_eq!(store.metadata_count(), 1);
    }

    #[tokio::test]
    async fn test_sink_failure_is_swallowed() {
        let store = MemoryAuditStore::new();
        store.set_failing(true);
        let logger = AuditLogger::spawn(Arc::new(store.clone()), 16);

        logger.record(AuditEvent::new("x", 500).failed("server_error", "boom"));
        logger.flush().await;
        assert!(store.events().is_empty());

        store.set_failing(false);
        logger.record(AuditEvent::new("x", 404).failed("not_found", ""));
        logger.flush().await;
        assert_eq!(store.events().len(), 1);
    }

    #[tokio::test]
    async fn test_full_queue_drops() {
        let store = MemoryAuditStore::new();
        let logger = AuditLogger::spawn(Arc::new(store.clone()), 1);

        // The writer cannot run until this task yields, so only one fits.
        for _ in 0..5 {
            logger.record(AuditEvent::new("x", 429).failed("rate_limited", ""));
        }
        assert_eq!(logger.dropped(), 4);

        logger.flush().await;
        assert_eq!(store.events().len(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_drains_then_drops() {
        let store = MemoryAuditStore::new();
        let logger = AuditLogger::spawn(Arc::new(store.clone()), 16);

        logger.record(AuditEvent::new("x", 403).failed("not_applicable", ""));
        logger.shutdown().await;
        assert_eq!(store.events().len(), 1);

        logger.record(AuditEvent::new("x", 403).failed("not_applicable", ""));
        assert_eq!(logger.dropped(), 1);
    }
}
