//! Prioritization strategy names
//!
//! The service owns the set of valid strategies. The client forwards whatever
//! name is selected; the presets below only drive cycling and listing.

use serde::{Deserialize, Serialize};

/// Strategy used when nothing else is configured
pub const DEFAULT_STRATEGY: &str = "smart_balance";

/// Strategies the scoring service is known to implement, with display labels
pub const KNOWN_STRATEGIES: &[(&str, &str)] = &[
    ("smart_balance", "Smart Balance"),
    ("fastest_wins", "Fastest Wins"),
    ("high_impact", "High Impact"),
    ("deadline_driven", "Deadline Driven"),
];

/// A strategy name, forwarded opaquely to the scoring service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Strategy(String);

impl Default for Strategy {
    fn default() -> Self {
        Self(DEFAULT_STRATEGY.to_string())
    }
}

impl Strategy {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Wire name
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Human label for known presets, the raw name otherwise
    pub fn label(&self) -> &str {
        KNOWN_STRATEGIES
            .iter()
            .find(|(name, _)| *name == self.0)
            .map(|(_, label)| *label)
            .unwrap_or(&self.0)
    }

    /// Whether this is one of the known presets
    pub fn is_known(&self) -> bool {
        KNOWN_STRATEGIES.iter().any(|(name, _)| *name == self.0)
    }

    /// Next preset in the cycle; a custom name cycles back to the first preset
    pub fn next(&self) -> Self {
        let idx = KNOWN_STRATEGIES.iter().position(|(name, _)| *name == self.0);
        let next = match idx {
            Some(i) => (i + 1) % KNOWN_STRATEGIES.len(),
            None => 0,
        };
        Self::new(KNOWN_STRATEGIES[next].0)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Strategy {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strategy() {
        let strategy = Strategy::default();
        assert_eq!(strategy.name(), "smart_balance");
        assert_eq!(strategy.label(), "Smart Balance");
        assert!(strategy.is_known());
    }

    #[test]
    fn test_cycle_wraps() {
        let mut strategy = Strategy::default();
        let mut seen = Vec::new();
        for _ in 0..KNOWN_STRATEGIES.len() {
            seen.push(strategy.name().to_string());
            strategy = strategy.next();
        }
        assert_eq!(strategy, Strategy::default());
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[3], "deadline_driven");
    }

    #[test]
    fn test_custom_strategy_passes_through() {
        let strategy = Strategy::new("eisenhower");
        assert_eq!(strategy.name(), "eisenhower");
        assert_eq!(strategy.label(), "eisenhower");
        assert!(!strategy.is_known());
        assert_eq!(strategy.next().name(), "smart_balance");
    }

    #[test]
    fn test_strategy_serializes_as_string() {
        let json = serde_json::to_string(&Strategy::new("high_impact")).unwrap();
        assert_eq!(json, "\"high_impact\"");
    }
}
