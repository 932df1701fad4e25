//! Fixed-output classifier for pipeline tests

use ndarray::{Array2, Array3, ArrayView2};

use super::classifier::{Classifier, RawExplanation};
use crate::logic::error::ScoringResult;
use crate::logic::features::{FEATURE_COUNT, FEATURE_LAYOUT};

/// Returns the same probability for every row and explains it in the
/// stacked `[instance, feature, class]` layout.
pub struct StubClassifier {
    feature_names: Vec<String>,
    probability: f64,
    base_value: f64,
    weights: [f64; FEATURE_COUNT],
}

impl StubClassifier {
    /// Attribution splits `probability - 0.5` evenly over the features
    pub fn new(probability: f64) -> Self {
        let share = (probability - 0.5) / FEATURE_COUNT as f64;
        Self {
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
            probability,
            base_value: 0.5,
            weights: [share; FEATURE_COUNT],
        }
    }

    /// Override the positive-class attribution, consistent or not
    pub fn with_attribution(mut self, base_value: f64, weights: [f64; FEATURE_COUNT]) -> Self {
        self.base_value = base_value;
        self.weights = weights;
        self
    }

    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = names;
        self
    }
}

impl Classifier for StubClassifier {
    fn model_type(&self) -> &str {
        "stub"
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_proba(&self, rows: ArrayView2<'_, f64>) -> ScoringResult<Array2<f64>> {
        let p = self.probability;
        Ok(Array2::from_shape_fn((rows.nrows(), 2), |(_, c)| if c == 1 { p } else { 1.0 - p }))
    }

    fn shap_values(&self, rows: ArrayView2<'_, f64>) -> ScoringResult<RawExplanation> {
        let values = Array3::from_shape_fn((rows.nrows(), FEATURE_COUNT, 2), |(_, j, c)| {
            if c == 1 { self.weights[j] } else { -self.weights[j] }
        });
        Ok(RawExplanation::Stacked {
            values,
            expected_values: vec![1.0 - self.base_value, self.base_value],
        })
    }
}
