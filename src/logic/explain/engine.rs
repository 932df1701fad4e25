use super::types::{Attribution, AttributionInconsistent, AttributionRecord, FeatureContribution};
use crate::logic::features::FeatureVector;
use crate::logic::model::Explanation;

/// Zip names, values and weights in layout order, then check
/// `|base + Σw - p| <= tolerance * max(1, |p|)`.
///
/// A failed check is logged and returned as a warning; the record is still
/// built so the caller can render it.
pub fn build_attribution(
    features: &FeatureVector,
    explanation: &Explanation,
    probability: f64,
    tolerance: f64,
) -> Attribution {
    let contributions: Vec<FeatureContribution> = features
        .named_values()
        .zip(explanation.weights.iter())
        .map(|((name, value), &weight)| FeatureContribution { name, value, weight })
        .collect();

    let record = AttributionRecord {
        base_value: explanation.base_value,
        probability,
        contributions,
    };

    let warning = check_additivity(&record, tolerance);
    if let Some(w) = &warning {
        log::warn!("{}", w);
    }

    Attribution { record, warning }
}

pub fn check_additivity(record: &AttributionRecord, tolerance: f64) -> Option<AttributionInconsistent> {
    let difference = (record.reconstructed() - record.probability).abs();
    let allowed = tolerance * record.probability.abs().max(1.0);

    // NaN differences fail too
    if difference <= allowed {
        return None;
    }

    Some(AttributionInconsistent {
        base_value: record.base_value,
        contribution_sum: record.contribution_sum(),
        probability: record.probability,
        difference,
        tolerance,
    })
}
