//! Post Inputs - Raw signals as they arrive from the input boundary
//!
//! Six numeric engagement signals plus two categorical selections.
//! Range checks belong to the boundary (`PostInputs::validate`); the mapper
//! trusts whatever reaches it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::logic::error::{ScoringError, ScoringResult};

// ============================================================================
// CATEGORICAL SELECTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum CaptionLength {
    Short,
    Medium,
    Long,
}

impl CaptionLength {
    pub const ALL: [CaptionLength; 3] = [CaptionLength::Short, CaptionLength::Medium, CaptionLength::Long];

    pub fn label(&self) -> &'static str {
        match self {
            CaptionLength::Short => "Short",
            CaptionLength::Medium => "Medium",
            CaptionLength::Long => "Long",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum HashtagUsage {
    Suboptimal,
    Optimal,
}

impl HashtagUsage {
    pub const ALL: [HashtagUsage; 2] = [HashtagUsage::Suboptimal, HashtagUsage::Optimal];

    pub fn label(&self) -> &'static str {
        match self {
            HashtagUsage::Suboptimal => "Suboptimal",
            HashtagUsage::Optimal => "Optimal",
        }
    }
}

/// Unknown categorical label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption {
    pub field: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} option '{}'", self.field, self.value)
    }
}

impl std::error::Error for UnknownOption {}

impl FromStr for CaptionLength {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CaptionLength::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownOption { field: "caption_length", value: s.to_string() })
    }
}

impl FromStr for HashtagUsage {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HashtagUsage::ALL
            .into_iter()
            .find(|h| h.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownOption { field: "hashtag_usage", value: s.to_string() })
    }
}

impl TryFrom<String> for CaptionLength {
    type Error = UnknownOption;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for HashtagUsage {
    type Error = UnknownOption;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for CaptionLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for HashtagUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// INPUT BOUNDS
// ============================================================================

/// Documented range of one numeric input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputBound {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl InputBound {
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

/// Ranges and pre-filled defaults of the numeric inputs, in field order
pub const INPUT_BOUNDS: [InputBound; 6] = [
    InputBound { field: "likes", min: 0.0, max: 500.0, default: 50.0 },
    InputBound { field: "comments", min: 0.0, max: 100.0, default: 10.0 },
    InputBound { field: "shares", min: 0.0, max: 100.0, default: 5.0 },
    InputBound { field: "saves", min: 0.0, max: 200.0, default: 20.0 },
    InputBound { field: "active_passive_ratio", min: 0.0, max: 5.0, default: 0.5 },
    InputBound { field: "log_reach", min: 8.0, max: 15.0, default: 12.0 },
];

// ============================================================================
// POST INPUTS
// ============================================================================

/// Raw inputs for one assessment. Rates are per 10K reach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostInputs {
    pub likes: f64,
    pub comments: f64,
    pub shares: f64,
    pub saves: f64,
    pub active_passive_ratio: f64,
    pub log_reach: f64,
    pub caption_length: CaptionLength,
    pub hashtag_usage: HashtagUsage,
}

impl Default for PostInputs {
    fn default() -> Self {
        Self {
            likes: INPUT_BOUNDS[0].default,
            comments: INPUT_BOUNDS[1].default,
            shares: INPUT_BOUNDS[2].default,
            saves: INPUT_BOUNDS[3].default,
            active_passive_ratio: INPUT_BOUNDS[4].default,
            log_reach: INPUT_BOUNDS[5].default,
            caption_length: CaptionLength::Short,
            hashtag_usage: HashtagUsage::Suboptimal,
        }
    }
}

impl PostInputs {
    /// Numeric signals in `INPUT_BOUNDS` order
    pub fn numeric_signals(&self) -> [f64; 6] {
        [
            self.likes,
            self.comments,
            self.shares,
            self.saves,
            self.active_passive_ratio,
            self.log_reach,
        ]
    }

    /// Boundary range check. Reports the first offending field.
    pub fn validate(&self) -> ScoringResult<()> {
        for (bound, value) in INPUT_BOUNDS.iter().zip(self.numeric_signals()) {
            if !bound.contains(value) {
                return Err(ScoringError::InputOutOfRange {
                    field: bound.field,
                    value,
                    min: bound.min,
                    max: bound.max,
                });
            }
        }
        Ok(())
    }
}
