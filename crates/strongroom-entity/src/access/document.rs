//! Static descriptor of a deliverable asset.

use std::collections::BTreeSet;

use serde::Serialize;

use strongroom_core::AppError;
use strongroom_core::types::Slug;

use super::tier::Tier;

/// A registered document and the rules gating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessControlledDocument {
    slug: Slug,
    title: String,
    allowed_tiers: BTreeSet<Tier>,
    requires_explicit_grant: bool,
    preview_only: bool,
    private: bool,
}

impl AccessControlledDocument {
    /// Build a descriptor. Fails when `allowed_tiers` is empty.
    pub fn new(
        slug: Slug,
        title: impl Into<String>,
        allowed_tiers: impl IntoIterator<Item = Tier>,
    ) -> Result<Self, AppError> {
        let allowed_tiers: BTreeSet<Tier> = allowed_tiers.into_iter().collect();
        if allowed_tiers.is_empty() {
            return Err(AppError::configuration(format!(
                "Document '{slug}' must allow at least one tier"
            )));
        }
        Ok(Self {
            slug,
            title: title.into(),
            allowed_tiers,
            requires_explicit_grant: false,
            preview_only: false,
            private: false,
        })
    }

    /// Require the explicit private grant.
    pub fn with_explicit_grant(mut self, required: bool) -> Self {
        self.requires_explicit_grant = required;
        self
    }

    /// Serve inline instead of as an attachment.
    pub fn with_preview_only(mut self, preview_only: bool) -> Self {
        self.preview_only = preview_only;
        self
    }

    /// Flag the document as part of the private class.
    pub fn with_private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// Stable identifier.
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Tiers that satisfy access, ascending.
    pub fn allowed_tiers(&self) -> &BTreeSet<Tier> {
        &self.allowed_tiers
    }

    /// Lowest allowed tier.
    pub fn min_tier(&self) -> Tier {
        self.allowed_tiers.first().copied().unwrap_or_default()
    }

    /// Highest allowed tier.
    pub fn max_tier(&self) -> Tier {
        self.allowed_tiers.last().copied().unwrap_or_default()
    }

    /// True when the allowed tiers form an unbroken run of the tier ladder,
    /// in which case they act as a minimum threshold.
    pub fn is_contiguous(&self) -> bool {
        let (min, max) = (self.min_tier(), self.max_tier());
        Tier::ALL
            .iter()
            .filter(|t| **t >= min && **t <= max)
            .all(|t| self.allowed_tiers.contains(t))
    }

    /// Whether the explicit private grant is required.
    pub fn requires_explicit_grant(&self) -> bool {
        self.requires_explicit_grant
    }

    /// Whether the document is served inline.
    pub fn preview_only(&self) -> bool {
        self.preview_only
    }

    /// Whether the document belongs to the private class served by the
    /// guarded delivery path.
    pub fn is_private_class(&self) -> bool {
        self.private || self.requires_explicit_grant || self.allowed_tiers.contains(&Tier::Restricted)
    }
}
