//! Membership tier enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered membership levels gating access to content.
///
/// Ordering: Public < Basic < Premium < Enterprise < Restricted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Open access.
    #[default]
    #[serde(alias = "free")]
    Public,
    /// Member access.
    #[serde(alias = "inner-circle")]
    Basic,
    /// Premium member access.
    #[serde(alias = "inner-circle-plus")]
    Premium,
    /// Enterprise member access.
    #[serde(alias = "inner-circle-elite")]
    Enterprise,
    /// In-house only.
    #[serde(alias = "private")]
    Restricted,
}

impl Tier {
    /// Every tier in ascending order.
    pub const ALL: [Tier; 5] = [
        Tier::Public,
        Tier::Basic,
        Tier::Premium,
        Tier::Enterprise,
        Tier::Restricted,
    ];

    /// Return the tier as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Basic => "basic",
            Self::Premium => "premium",
            Self::Enterprise => "enterprise",
            Self::Restricted => "restricted",
        }
    }

    /// Human-facing tier name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Basic => "Inner Circle",
            Self::Premium => "Inner Circle Plus",
            Self::Enterprise => "Inner Circle Elite",
            Self::Restricted => "Private (In-House)",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tier {
    type Err = strongroom_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "public" | "free" => Ok(Self::Public),
            "basic" | "inner-circle" => Ok(Self::Basic),
            "premium" | "inner-circle-plus" => Ok(Self::Premium),
            "enterprise" | "inner-circle-elite" => Ok(Self::Enterprise),
            "restricted" | "private" => Ok(Self::Restricted),
            _ => Err(strongroom_core::AppError::invalid_input(format!(
                "Invalid tier: '{s}'. Expected one of: public, basic, premium, enterprise, restricted"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(Tier::Public < Tier::Basic);
        assert!(Tier::Basic < Tier::Premium);
        assert!(Tier::Premium < Tier::Enterprise);
        assert!(Tier::Enterprise < Tier::Restricted);
        assert_eq!(Tier::ALL.iter().max(), Some(&Tier::Restricted));
    }

    #[test]
    fn test_from_str_and_aliases() {
        assert_eq!("premium".parse::<Tier>().unwrap(), Tier::Premium);
        assert_eq!("ENTERPRISE".parse::<Tier>().unwrap(), Tier::Enterprise);
        assert_eq!("inner-circle".parse::<Tier>().unwrap(), Tier::Basic);
        assert_eq!("private".parse::<Tier>().unwrap(), Tier::Restricted);
        assert!("gold".parse::<Tier>().is_err());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Tier::Premium.display_name(), "Inner Circle Plus");
        assert_eq!(Tier::Premium.to_string(), "premium");
    }

    #[test]
    fn test_serde_aliases() {
        let tier: Tier = serde_json::from_str("\"inner-circle-plus\"").unwrap();
        assert_eq!(tier, Tier::Premium);
        assert_eq!(serde_json::to_string(&Tier::Restricted).unwrap(), "\"restricted\"");
    }
}
