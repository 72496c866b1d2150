//! Download audit repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use strongroom_core::error::{AppError, ErrorKind};
use strongroom_core::result::AppResult;
use strongroom_entity::{AuditEvent, ContentMetadata};

use crate::sink::AuditSink;

/// Repository for download audit events and per-document counters.
#[derive(Debug, Clone)]
pub struct PgAuditRepository {
    pool: PgPool,
}

impl PgAuditRepository {
    /// Create a new audit repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditSink for PgAuditRepository {
    fn backend(&self) -> &str {
        "postgres"
    }

    async fn write_event(&self, event: &AuditEvent) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO download_audit_events \
             (id, slug, status_code, success, latency_ms, member_id, email_hash, ip_hash, \
              user_agent, referrer, error_code, error_detail, file_name, file_size, file_hash, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)",
        )
        .bind(event.id)
        .bind(&event.slug)
        .bind(event.status_code)
        .bind(event.success)
        .bind(event.latency_ms)
        .bind(&event.member_id)
        .bind(&event.email_hash)
        .bind(&event.ip_hash)
        .bind(&event.user_agent)
        .bind(&event.referrer)
        .bind(&event.error_code)
        .bind(&event.error_detail)
        .bind(&event.file_name)
        .bind(event.file_size)
        .bind(&event.file_hash)
        .bind(event.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to write audit event", e))?;
        Ok(())
    }

    async fn bump_metadata(&self, slug: &str, at: DateTime<Utc>) -> AppResult<ContentMetadata> {
        sqlx::query_as::<_, ContentMetadata>(
            "INSERT INTO content_metadata (slug, total_downloads, last_download_at, created_at, updated_at) \
             VALUES ($1, 1, $2, $2, $2) \
             ON CONFLICT (slug) DO UPDATE SET \
               total_downloads = content_metadata.total_downloads + 1, \
               last_download_at = EXCLUDED.last_download_at, \
               updated_at = EXCLUDED.updated_at \
             RETURNING *",
        )
        .bind(slug)
        .bind(at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to bump content metadata", e)
        })
    }
}
