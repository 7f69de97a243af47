//! Priority tiers derived from service scores

use serde::{Deserialize, Serialize};

/// Lowest score that lands in [`Tier::High`]
pub const HIGH_THRESHOLD: f64 = 120.0;

/// Lowest score that lands in [`Tier::Medium`]
pub const MEDIUM_THRESHOLD: f64 = 80.0;

/// Priority tier of a scored task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Low,
    Medium,
    High,
}

/// Map a score to its tier
///
/// Lower bounds are inclusive. NaN compares false against both thresholds and
/// therefore lands in [`Tier::Low`].
pub fn classify(score: f64) -> Tier {
    if score >= HIGH_THRESHOLD {
        Tier::High
    } else if score >= MEDIUM_THRESHOLD {
        Tier::Medium
    } else {
        Tier::Low
    }
}

impl Tier {
    /// Styling category used by card presenters
    pub fn style_class(&self) -> &'static str {
        match self {
            Self::Low => "priority-low",
            Self::Medium => "priority-medium",
            Self::High => "priority-high",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown tier: {}", s)),
        }
    }
}
