//! Document registry entries.

use serde::{Deserialize, Serialize};

/// One registered document, as written in the `[[documents]]` table.
///
/// Tier names are kept as strings here and parsed when the registry is
/// built, so a typo surfaces as a configuration error at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEntry {
    /// Stable identifier used in the request path.
    pub slug: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Tiers that satisfy access. Must not be empty.
    pub tiers: Vec<String>,
    /// Require an explicit private grant regardless of tier.
    #[serde(default)]
    pub requires_explicit_grant: bool,
    /// Serve inline rather than as an attachment.
    #[serde(default)]
    pub preview_only: bool,
    /// Mark the document as belonging to the private class.
    #[serde(default)]
    pub private: bool,
}
