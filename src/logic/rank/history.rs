//! Probability History - Append-only record of a session's predictions

use serde::{Deserialize, Serialize};

/// Past probabilities in arrival order. Never truncated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbabilityHistory {
    entries: Vec<f64>,
}

impl ProbabilityHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, probability: f64) {
        self.entries.push(probability);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.entries
    }

    /// Entries strictly below `probability`; ties do not count
    pub fn count_below(&self, probability: f64) -> usize {
        self.entries.iter().filter(|&&p| p < probability).count()
    }

    /// Fraction of entries strictly below `probability`.
    /// Empty history ranks everything at 0.
    pub fn percentile_rank(&self, probability: f64) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.count_below(probability) as f64 / self.entries.len() as f64
    }

    pub fn stats(&self) -> RankStats {
        let n = self.entries.len();
        if n == 0 {
            return RankStats::default();
        }

        let mean = self.entries.iter().sum::<f64>() / n as f64;
        let min = self.entries.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.entries.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        RankStats { sample_count: n, mean, min, max }
    }
}

/// History statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankStats {
    pub sample_count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}
