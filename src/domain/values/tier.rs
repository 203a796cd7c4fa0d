use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered performance bucket assigned by clustering. The ordering is
/// meaningful: a higher variant always corresponds to a cluster with a
/// higher mean relative performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Low,
    LowMid,
    HighMid,
    High,
    UltraHigh,
}

impl Tier {
    /// All tiers, ascending by performance. Cluster-to-tier naming walks
    /// this array after sorting clusters by mean.
    pub const ORDERED: [Tier; 5] = [
        Tier::Low,
        Tier::LowMid,
        Tier::HighMid,
        Tier::High,
        Tier::UltraHigh,
    ];
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Low => write!(f, "Low"),
            Tier::LowMid => write!(f, "Low-Mid"),
            Tier::HighMid => write!(f, "High-Mid"),
            Tier::High => write!(f, "High"),
            Tier::UltraHigh => write!(f, "Ultra-High"),
        }
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Tier::Low),
            "low-mid" | "lowmid" => Ok(Tier::LowMid),
            "high-mid" | "highmid" => Ok(Tier::HighMid),
            "high" => Ok(Tier::High),
            "ultra-high" | "ultrahigh" | "ultra" => Ok(Tier::UltraHigh),
            _ => Err(format!("Unknown tier: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_matches_named_order() {
        assert!(Tier::Low < Tier::LowMid);
        assert!(Tier::LowMid < Tier::HighMid);
        assert!(Tier::HighMid < Tier::High);
        assert!(Tier::High < Tier::UltraHigh);
    }

    #[test]
    fn test_display_round_trips() {
        for tier in Tier::ORDERED {
            let parsed: Tier = tier.to_string().parse().unwrap();
            assert_eq!(parsed, tier);
        }
    }
}
