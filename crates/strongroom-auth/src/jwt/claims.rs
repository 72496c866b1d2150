//! JWT claims carried by member session tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use strongroom_entity::Tier;

/// Claims payload embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the opaque member ID.
    pub sub: String,
    /// Membership tier at issuance.
    pub tier: Tier,
    /// SHA-256 hex of the member's email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_hash: Option<String>,
    /// In-house staff flag.
    #[serde(default)]
    pub is_internal: bool,
    /// Explicit grant for documents that require one.
    #[serde(default)]
    pub allow_private: bool,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl SessionClaims {
    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}
