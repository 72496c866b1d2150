//! Authorization outcome.

use serde::Serialize;

use super::tier::Tier;

/// Why a decision was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    /// Access granted.
    Ok,
    /// The caller's tier does not satisfy the document.
    TierInsufficient,
    /// The document needs an explicit private grant.
    GrantRequired,
    /// The caller has no valid session.
    SessionInvalid,
}

impl ReasonCode {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::TierInsufficient => "tier_insufficient",
            Self::GrantRequired => "grant_required",
            Self::SessionInvalid => "session_invalid",
        }
    }
}

/// Outcome of authorizing one context against one document.
///
/// `allowed` is true exactly when the reason is [`ReasonCode::Ok`]; the
/// constructors are the only way to build a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    allowed: bool,
    reason_code: ReasonCode,
    required_tier: Tier,
    current_tier: Tier,
}

impl Decision {
    /// An allowing decision.
    pub fn allow(required_tier: Tier, current_tier: Tier) -> Self {
        Self {
            allowed: true,
            reason_code: ReasonCode::Ok,
            required_tier,
            current_tier,
        }
    }

    /// A denying decision. A reason of [`ReasonCode::Ok`] is not a denial and
    /// is coerced to [`ReasonCode::TierInsufficient`].
    pub fn deny(reason_code: ReasonCode, required_tier: Tier, current_tier: Tier) -> Self {
        let reason_code = match reason_code {
            ReasonCode::Ok => ReasonCode::TierInsufficient,
            other => other,
        };
        Self {
            allowed: false,
            reason_code,
            required_tier,
            current_tier,
        }
    }

    /// Whether access is granted.
    pub fn allowed(&self) -> bool {
        self.allowed
    }

    /// Reason for the outcome.
    pub fn reason_code(&self) -> ReasonCode {
        self.reason_code
    }

    /// Tier the document asks for.
    pub fn required_tier(&self) -> Tier {
        self.required_tier
    }

    /// Tier the caller was evaluated at.
    pub fn current_tier(&self) -> Tier {
        self.current_tier
    }
}
