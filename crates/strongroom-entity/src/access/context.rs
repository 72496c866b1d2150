//! Per-request caller identity.

use serde::Serialize;

use super::tier::Tier;

/// Resolved caller identity for one request.
///
/// Constructed fresh per request and never mutated afterwards. The only
/// way to obtain a context with `session_valid == false` is
/// [`AccessContext::anonymous`], which pins the tier to
/// [`Tier::Public`] and carries no member identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessContext {
    tier: Tier,
    member_id: Option<String>,
    email_hash: Option<String>,
    is_internal: bool,
    allow_private_override: bool,
    session_valid: bool,
}

impl AccessContext {
    /// Context for a caller without a valid session.
    pub fn anonymous() -> Self {
        Self {
            tier: Tier::Public,
            member_id: None,
            email_hash: None,
            is_internal: false,
            allow_private_override: false,
            session_valid: false,
        }
    }

    /// Context for a caller with a valid session at `tier`.
    pub fn authenticated(tier: Tier) -> Self {
        Self {
            tier,
            session_valid: true,
            ..Self::anonymous()
        }
    }

    /// Attach the opaque member identifier.
    pub fn with_member_id(mut self, member_id: impl Into<String>) -> Self {
        if self.session_valid {
            self.member_id = Some(member_id.into());
        }
        self
    }

    /// Attach the one-way hash of the member's email.
    pub fn with_email_hash(mut self, email_hash: impl Into<String>) -> Self {
        if self.session_valid {
            self.email_hash = Some(email_hash.into());
        }
        self
    }

    /// Mark the caller as in-house staff.
    pub fn with_internal(mut self, is_internal: bool) -> Self {
        self.is_internal = self.session_valid && is_internal;
        self
    }

    /// Grant or withhold the explicit private override.
    pub fn with_private_override(mut self, allow: bool) -> Self {
        self.allow_private_override = self.session_valid && allow;
        self
    }

    /// The tier recorded on the session.
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// The tier used for access checks. In-house staff rank as restricted.
    pub fn effective_tier(&self) -> Tier {
        if self.is_internal {
            Tier::Restricted
        } else {
            self.tier
        }
    }

    /// Opaque member identifier, if authenticated as a member.
    pub fn member_id(&self) -> Option<&str> {
        self.member_id.as_deref()
    }

    /// One-way hash of the member's email.
    pub fn email_hash(&self) -> Option<&str> {
        self.email_hash.as_deref()
    }

    /// Whether the caller is in-house staff.
    pub fn is_internal(&self) -> bool {
        self.is_internal
    }

    /// Whether the caller holds the explicit private grant.
    pub fn allow_private_override(&self) -> bool {
        self.allow_private_override
    }

    /// Whether the session was valid.
    pub fn session_valid(&self) -> bool {
        self.session_valid
    }
}

impl Default for AccessContext {
    fn default() -> Self {
        Self::anonymous()
    }
}
