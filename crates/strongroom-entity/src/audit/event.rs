//! Download audit event entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An immutable record of one delivery attempt, successful or not.
///
/// Raw client IPs and emails never appear here; only their SHA-256 hex
/// digests do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AuditEvent {
    /// Unique event identifier.
    pub id: Uuid,
    /// Requested document slug, as received.
    pub slug: String,
    /// HTTP status returned to the caller.
    pub status_code: i32,
    /// Whether the document was delivered.
    pub success: bool,
    /// Time from request start to outcome.
    pub latency_ms: i64,
    /// Opaque member identifier, when authenticated.
    pub member_id: Option<String>,
    /// Hash of the member's email.
    pub email_hash: Option<String>,
    /// Hash of the client IP.
    pub ip_hash: Option<String>,
    /// Caller user agent.
    pub user_agent: Option<String>,
    /// Caller referrer.
    pub referrer: Option<String>,
    /// Wire-level error code on failure.
    pub error_code: Option<String>,
    /// Internal failure detail.
    pub error_detail: Option<String>,
    /// Delivered file name.
    pub file_name: Option<String>,
    /// Delivered size in bytes.
    pub file_size: Option<i64>,
    /// SHA-256 hex of the delivered bytes.
    pub file_hash: Option<String>,
    /// When the event was produced.
    pub created_at: DateTime<Utc>,
}

impl AuditEvent {
    /// Start an event for `slug` with the given status.
    pub fn new(slug: impl Into<String>, status_code: u16) -> Self {
        Self {
            id: Uuid::now_v7(),
            slug: slug.into(),
            status_code: i32::from(status_code),
            success: false,
            latency_ms: 0,
            member_id: None,
            email_hash: None,
            ip_hash: None,
            user_agent: None,
            referrer: None,
            error_code: None,
            error_detail: None,
            file_name: None,
            file_size: None,
            file_hash: None,
            created_at: Utc::now(),
        }
    }

    /// Mark the event as a successful delivery of `file_name`.
    pub fn delivered(mut self, file_name: impl Into<String>, file_size: u64, file_hash: impl Into<String>) -> Self {
        self.success = true;
        self.error_code = None;
        self.error_detail = None;
        self.file_name = Some(file_name.into());
        self.file_size = Some(i64::try_from(file_size).unwrap_or(i64::MAX));
        self.file_hash = Some(file_hash.into());
        self
    }

    /// Mark the event as failed.
    pub fn failed(mut self, error_code: impl Into<String>, detail: impl Into<String>) -> Self {
        self.success = false;
        self.error_code = Some(error_code.into());
        let detail = detail.into();
        self.error_detail = (!detail.is_empty()).then_some(detail);
        self
    }

    /// Set the elapsed time.
    pub fn with_latency_ms(mut self, latency_ms: u128) -> Self {
        self.latency_ms = i64::try_from(latency_ms).unwrap_or(i64::MAX);
        self
    }

    /// Attach caller identity.
    pub fn with_identity(mut self, member_id: Option<&str>, email_hash: Option<&str>) -> Self {
        self.member_id = member_id.map(str::to_owned);
        self.email_hash = email_hash.map(str::to_owned);
        self
    }

    /// Attach client metadata. `ip_hash` must already be hashed.
    pub fn with_client(
        mut self,
        ip_hash: Option<String>,
        user_agent: Option<String>,
        referrer: Option<String>,
    ) -> Self {
        self.ip_hash = ip_hash;
        self.user_agent = user_agent;
        self.referrer = referrer;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_event_carries_code() {
        let event = AuditEvent::new("board-playbook", 403)
            .failed("access_denied", "tier_insufficient")
            .with_latency_ms(12);
        assert!(!event.success);
        assert_eq!(event.status_code, 403);
        assert_eq!(event.error_code.as_deref(), Some("access_denied"));
        assert_eq!(event.error_detail.as_deref(), Some("tier_insufficient"));
        assert_eq!(event.latency_ms, 12);
        assert!(event.file_hash.is_none());
    }

    #[test]
    fn test_delivered_event_clears_error() {
        let event = AuditEvent::new("board-playbook", 200)
            .failed("timeout", "")
            .delivered("board-playbook.pdf", 42, "ab12");
        assert!(event.success);
        assert!(event.error_code.is_none());
        assert_eq!(event.file_size, Some(42));
        assert_eq!(event.file_hash.as_deref(), Some("ab12"));
    }
}
