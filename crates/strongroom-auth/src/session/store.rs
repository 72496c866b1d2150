//! Session store trait and shared types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use strongroom_core::AppResult;
use strongroom_entity::Tier;

/// Raw credentials presented with a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Token from an `Authorization: Bearer` header.
    pub bearer_token: Option<String>,
    /// Value of the session cookie.
    pub session_cookie: Option<String>,
}

impl Credentials {
    /// Credentials carrying nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Credentials carrying a bearer token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(token.into()),
            session_cookie: None,
        }
    }

    /// The token to validate. The bearer header wins over the cookie;
    /// blank values count as absent.
    pub fn token(&self) -> Option<&str> {
        [self.bearer_token.as_deref(), self.session_cookie.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|t| !t.is_empty())
    }
}

/// A live member session as reported by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque member identifier.
    pub member_id: String,
    /// Membership tier.
    pub tier: Tier,
    /// SHA-256 hex of the member's email.
    pub email_hash: Option<String>,
    /// In-house staff flag.
    pub is_internal: bool,
    /// Explicit grant for documents that require one.
    pub allow_private: bool,
    /// Expiry, when the store tracks one.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// A plain member session without extra grants.
    pub fn member(member_id: impl Into<String>, tier: Tier) -> Self {
        Self {
            member_id: member_id.into(),
            tier,
            email_hash: None,
            is_internal: false,
            allow_private: false,
            expires_at: None,
        }
    }

    /// Set the email hash.
    pub fn with_email_hash(mut self, email_hash: impl Into<String>) -> Self {
        self.email_hash = Some(email_hash.into());
        self
    }

    /// Set the in-house staff flag.
    pub fn with_internal(mut self, is_internal: bool) -> Self {
        self.is_internal = is_internal;
        self
    }

    /// Set the explicit private grant.
    pub fn with_private(mut self, allow: bool) -> Self {
        self.allow_private = allow;
        self
    }

    /// Set the expiry.
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Whether the session has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }
}

/// Source of member sessions.
///
/// `Ok(None)` means "no usable session" (absent, unknown, expired or
/// forged). `Err` is reserved for the store itself being unavailable.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Looks up the session behind the given credentials.
    async fn get_session(&self, credentials: &Credentials) -> AppResult<Option<Session>>;
}
