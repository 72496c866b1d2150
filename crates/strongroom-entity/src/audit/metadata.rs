//! Per-document download counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Aggregate download statistics for one slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ContentMetadata {
    /// Document slug (primary key).
    pub slug: String,
    /// Number of successful deliveries. Never decreases.
    pub total_downloads: i64,
    /// Time of the most recent successful delivery.
    pub last_download_at: Option<DateTime<Utc>>,
    /// When the record was first created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

impl ContentMetadata {
    /// A record describing the first download of `slug` at `at`.
    pub fn first_download(slug: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            slug: slug.into(),
            total_downloads: 1,
            last_download_at: Some(at),
            created_at: at,
            updated_at: at,
        }
    }

    /// Count another download at `at`.
    pub fn increment(&mut self, at: DateTime<Utc>) {
        self.total_downloads += 1;
        self.last_download_at = Some(at);
        self.updated_at = at;
    }
}
