//! Verdict Classifier - Percentile rank → tri-level verdict
//!
//! Cut points are fixed; a rank sitting exactly on a cut belongs to the
//! higher bucket.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest rank that counts as MODERATE
pub const MODERATE_RANK_THRESHOLD: f64 = 0.40;

/// Lowest rank that counts as HIGH
pub const HIGH_RANK_THRESHOLD: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Low,
    Moderate,
    High,
}

impl Verdict {
    /// Classify a rank in [0, 1]
    pub fn from_rank(rank: f64) -> Self {
        if rank >= HIGH_RANK_THRESHOLD {
            Verdict::High
        } else if rank >= MODERATE_RANK_THRESHOLD {
            Verdict::Moderate
        } else {
            Verdict::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Low => "LOW",
            Verdict::Moderate => "MODERATE",
            Verdict::High => "HIGH",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(Verdict::from_rank(0.0), Verdict::Low);
        assert_eq!(Verdict::from_rank(0.3999), Verdict::Low);
        assert_eq!(Verdict::from_rank(0.40), Verdict::Moderate);
        assert_eq!(Verdict::from_rank(0.7499), Verdict::Moderate);
        assert_eq!(Verdict::from_rank(0.75), Verdict::High);
        assert_eq!(Verdict::from_rank(1.0), Verdict::High);
    }

    #[test]
    fn test_verdicts_are_ordered() {
        assert!(Verdict::Low < Verdict::Moderate);
        assert!(Verdict::Moderate < Verdict::High);
    }

    #[test]
    fn test_monotonic_in_rank() {
        let mut previous = Verdict::Low;
        for i in 0..=1000 {
            let verdict = Verdict::from_rank(i as f64 / 1000.0);
            assert!(verdict >= previous);
            previous = verdict;
        }
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(serde_json::to_value(Verdict::Moderate).unwrap(), "MODERATE");
        assert_eq!(Verdict::High.to_string(), "HIGH");
    }
}
