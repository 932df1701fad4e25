use std::fmt;

use serde::Serialize;

/// One feature's share of the prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureContribution {
    pub name: &'static str,
    pub value: f64,  // the instance's feature value
    pub weight: f64, // additive contribution to the probability
}

/// Local attribution for a single prediction, in feature layout order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributionRecord {
    pub base_value: f64,
    pub probability: f64,
    pub contributions: Vec<FeatureContribution>,
}

impl AttributionRecord {
    pub fn contribution_sum(&self) -> f64 {
        self.contributions.iter().map(|c| c.weight).sum()
    }

    /// `base_value + Σ weight`
    pub fn reconstructed(&self) -> f64 {
        self.base_value + self.contribution_sum()
    }

    /// Largest |weight| first. A view for text summaries; the record keeps
    /// layout order.
    pub fn top_drivers(&self, n: usize) -> Vec<&FeatureContribution> {
        let mut ranked: Vec<&FeatureContribution> = self.contributions.iter().collect();
        ranked.sort_by(|a, b| {
            b.weight
                .abs()
                .partial_cmp(&a.weight.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(n);
        ranked
    }
}

/// Non-fatal: the attribution does not add up to the probability
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributionInconsistent {
    pub base_value: f64,
    pub contribution_sum: f64,
    pub probability: f64,
    pub difference: f64,
    pub tolerance: f64,
}

impl fmt::Display for AttributionInconsistent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Attribution inconsistent: base {:.6} + contributions {:.6} differs from probability {:.6} by {:.3e} (tolerance {:.1e})",
            self.base_value, self.contribution_sum, self.probability, self.difference, self.tolerance
        )
    }
}

impl std::error::Error for AttributionInconsistent {}

/// Record plus the optional consistency warning
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribution {
    pub record: AttributionRecord,
    pub warning: Option<AttributionInconsistent>,
}
