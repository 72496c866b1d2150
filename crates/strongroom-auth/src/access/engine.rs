//! Pure access decision engine.
//!
//! A document's allowed tiers are read in one of two ways:
//!
//! - **Threshold**: when the set is an unbroken run of the tier ladder, any
//!   tier at or above its minimum is admitted.
//! - **Discrete**: when the set has gaps, only exact members are admitted.

use strongroom_entity::{AccessContext, AccessControlledDocument, Decision, ReasonCode, Tier};

/// Decides whether a context may read a document. Stateless and
/// deterministic: identical inputs always yield identical decisions.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessDecisionEngine;

impl AccessDecisionEngine {
    /// Creates the engine.
    pub fn new() -> Self {
        Self
    }

    /// Authorizes `ctx` against `doc`.
    pub fn authorize(&self, doc: &AccessControlledDocument, ctx: &AccessContext) -> Decision {
        if !ctx.session_valid() {
            return Decision::deny(ReasonCode::SessionInvalid, doc.min_tier(), Tier::Public);
        }

        let current = ctx.effective_tier();

        if doc.requires_explicit_grant() && !ctx.allow_private_override() {
            return Decision::deny(ReasonCode::GrantRequired, doc.max_tier(), current);
        }

        if doc.is_contiguous() {
            if current >= doc.min_tier() {
                Decision::allow(doc.min_tier(), current)
            } else {
                Decision::deny(ReasonCode::TierInsufficient, doc.min_tier(), current)
            }
        } else if doc.allowed_tiers().contains(&current) {
            Decision::allow(current, current)
        } else {
            let required = doc
                .allowed_tiers()
                .iter()
                .copied()
                .find(|t| *t > current)
                .unwrap_or_else(|| doc.min_tier());
            Decision::deny(ReasonCode::TierInsufficient, required, current)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strongroom_core::types::Slug;

    fn doc(tiers: &[Tier]) -> AccessControlledDocument {
        AccessControlledDocument::new(
            Slug::parse("board-playbook").unwrap(),
            "Board Playbook",
            tiers.iter().copied(),
        )
        .unwrap()
    }

    fn member(tier: Tier) -> AccessContext {
        AccessContext::authenticated(tier).with_member_id("m-1")
    }

    #[test]
    fn test_board_playbook_scenarios() {
        let engine = AccessDecisionEngine::new();
        let playbook = doc(&[Tier::Premium, Tier::Enterprise]).with_private(true);

        let denied = engine.authorize(&playbook, &member(Tier::Basic));
        assert!(!denied.allowed());
        assert_eq!(denied.reason_code(), ReasonCode::TierInsufficient);
        assert_eq!(denied.required_tier(), Tier::Premium);
        assert_eq!(denied.current_tier(), Tier::Basic);

        let allowed = engine.authorize(&playbook, &member(Tier::Premium));
        assert!(allowed.allowed());
        assert_eq!(allowed.reason_code(), ReasonCode::Ok);
    }

    #[test]
    fn test_invalid_session() {
        let decision = AccessDecisionEngine::new()
            .authorize(&doc(&[Tier::Basic]), &AccessContext::anonymous());
        assert!(!decision.allowed());
        assert_eq!(decision.reason_code(), ReasonCode::SessionInvalid);
        assert_eq!(decision.required_tier(), Tier::Basic);
        assert_eq!(decision.current_tier(), Tier::Public);
    }

    #[test]
    fn test_deterministic() {
        let engine = AccessDecisionEngine::new();
        let d = doc(&[Tier::Premium]);
        for tier in Tier::ALL {
            let ctx = member(tier);
            assert_eq!(engine.authorize(&d, &ctx), engine.authorize(&d, &ctx));
        }
    }

    #[test]
    fn test_threshold_monotonic() {
        let engine = AccessDecisionEngine::new();
        for d in [
            doc(&[Tier::Basic]),
            doc(&[Tier::Premium, Tier::Enterprise]),
            doc(&[Tier::Enterprise]),
        ] {
            let mut seen_allow = false;
            for tier in Tier::ALL {
                let allowed = engine.authorize(&d, &member(tier)).allowed();
                if seen_allow {
                    assert!(allowed, "{tier} denied above an allowed tier");
                }
                seen_allow |= allowed;
            }
            assert!(seen_allow);
        }
    }

    #[test]
    fn test_grant_required() {
        let engine = AccessDecisionEngine::new();
        let d = doc(&[Tier::Basic, Tier::Premium]).with_explicit_grant(true);

        let denied = engine.authorize(&d, &member(Tier::Restricted).with_internal(true));
        assert_eq!(denied.reason_code(), ReasonCode::GrantRequired);
        assert_eq!(denied.required_tier(), Tier::Premium);

        let allowed = engine.authorize(&d, &member(Tier::Basic).with_private_override(true));
        assert!(allowed.allowed());
    }

    #[test]
    fn test_discrete_set_requires_membership() {
        let engine = AccessDecisionEngine::new();
        let d = doc(&[Tier::Basic, Tier::Enterprise]);

        assert!(engine.authorize(&d, &member(Tier::Basic)).allowed());
        assert!(engine.authorize(&d, &member(Tier::Enterprise)).allowed());

        let premium = engine.authorize(&d, &member(Tier::Premium));
        assert!(!premium.allowed());
        assert_eq!(premium.required_tier(), Tier::Enterprise);

        let restricted = engine.authorize(&d, &member(Tier::Restricted));
        assert!(!restricted.allowed());
        assert_eq!(restricted.required_tier(), Tier::Basic);
    }

    #[test]
    fn test_internal_staff_reach_restricted() {
        let engine = AccessDecisionEngine::new();
        let d = doc(&[Tier::Restricted]);
        assert!(!engine.authorize(&d, &member(Tier::Enterprise)).allowed());
        assert!(
            engine
                .authorize(&d, &member(Tier::Public).with_internal(true))
                .allowed()
        );
    }
}
