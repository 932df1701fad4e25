//! Classifier contract and raw explainer output
//!
//! Any served binary classifier plugs in behind [`Classifier`]. Explainers
//! disagree on output shape, so `shap_values` returns a [`RawExplanation`]
//! and the adapter collapses it to one [`Explanation`].

use ndarray::{Array2, Array3, ArrayView2};
use serde::Serialize;

use crate::logic::error::ScoringResult;
use crate::logic::features::FEATURE_COUNT;

/// Index of the "high-quality" class in every class axis
pub const POSITIVE_CLASS: usize = 1;

/// Trait cho served classifiers (tree ensembles, test stubs, ...)
pub trait Classifier: Send + Sync {
    /// Short model family name for status reports
    fn model_type(&self) -> &str;

    /// Feature names in the order the model was trained on
    fn feature_names(&self) -> &[String];

    /// Class probabilities, shape `[instances, classes]`
    fn predict_proba(&self, rows: ArrayView2<'_, f64>) -> ScoringResult<Array2<f64>>;

    /// Per-feature attributions in whatever layout the explainer produces
    fn shap_values(&self, rows: ArrayView2<'_, f64>) -> ScoringResult<RawExplanation>;
}

/// Explainer output before normalization
#[derive(Debug, Clone)]
pub enum RawExplanation {
    /// One `[instance, feature]` matrix per class
    PerClass {
        values: Vec<Array2<f64>>,
        expected_values: Vec<f64>,
    },
    /// One `[instance, feature, class]` tensor
    Stacked {
        values: Array3<f64>,
        expected_values: Vec<f64>,
    },
}

/// Positive-class attribution for a single instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Explanation {
    pub base_value: f64,
    /// Aligned with `FEATURE_LAYOUT`
    pub weights: [f64; FEATURE_COUNT],
}

impl Explanation {
    /// `base_value + Σ weights`, the score this explanation decomposes
    pub fn reconstructed(&self) -> f64 {
        self.base_value + self.weights.iter().sum::<f64>()
    }
}
