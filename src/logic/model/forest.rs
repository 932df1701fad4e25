//! Tree Ensemble - Probability-averaging forest loaded from a JSON artifact
//!
//! Artifact layout (one object per tree, nodes indexed from the root at 0):
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "feature_names": ["likes_per_10k_reach", "..."],
//!   "n_classes": 2,
//!   "trees": [
//!     { "nodes": [
//!         { "feature": 0, "threshold": 42.5, "left": 1, "right": 2, "cover": 100.0 },
//!         { "value": [0.8, 0.2], "cover": 60.0 },
//!         { "value": [0.3, 0.7], "cover": 40.0 }
//!     ] }
//!   ]
//! }
//! ```
//!
//! A sample goes left when `x[feature] <= threshold`. Leaf `value` holds class
//! probabilities; `cover` is the training weight that reached the node.
//!
//! Attributions are exact path-dependent Shapley values: the conditional
//! expectation of a tree given a feature subset follows `x` on split features
//! inside the subset and averages both children by cover otherwise. With a
//! handful of features the whole subset lattice is enumerated directly.

use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use super::classifier::{Classifier, RawExplanation};
use crate::logic::error::{ScoringError, ScoringResult};

/// Artifact format this loader understands
pub const FOREST_FORMAT_VERSION: u32 = 1;

/// Lattice enumeration is 2^n per instance; keep n small
pub const MAX_EXACT_FEATURES: usize = 16;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        cover: f64,
    },
    Leaf {
        value: Vec<f64>,
        cover: f64,
    },
}

impl TreeNode {
    pub fn cover(&self) -> f64 {
        match self {
            TreeNode::Split { cover, .. } | TreeNode::Leaf { cover, .. } => *cover,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub format_version: u32,
    pub feature_names: Vec<String>,
    pub n_classes: usize,
    pub trees: Vec<DecisionTree>,
}

// ============================================================================
// LOADING & VALIDATION
// ============================================================================

impl TreeEnsemble {
    /// Parse and structurally validate an artifact
    pub fn from_slice(bytes: &[u8]) -> ScoringResult<Self> {
        let ensemble: TreeEnsemble = serde_json::from_slice(bytes)?;
        ensemble.validate().map_err(ScoringError::ModelUnavailable)?;
        Ok(ensemble)
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    fn validate(&self) -> Result<(), String> {
        if self.format_version != FOREST_FORMAT_VERSION {
            return Err(format!(
                "unsupported forest format v{} (expected v{})",
                self.format_version, FOREST_FORMAT_VERSION
            ));
        }
        if self.n_classes < 2 {
            return Err(format!("binary classifier needs 2 classes, artifact has {}", self.n_classes));
        }
        let n_features = self.feature_names.len();
        if n_features == 0 || n_features > MAX_EXACT_FEATURES {
            return Err(format!("feature count {} outside 1..={}", n_features, MAX_EXACT_FEATURES));
        }
        if self.trees.is_empty() {
            return Err("ensemble has no trees".to_string());
        }

        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(format!("tree {} has no nodes", t));
            }
            for (i, node) in tree.nodes.iter().enumerate() {
                let cover = node.cover();
                if !cover.is_finite() || cover <= 0.0 {
                    return Err(format!("tree {} node {}: cover must be positive", t, i));
                }
                match node {
                    TreeNode::Split { feature, threshold, left, right, .. } => {
                        if *feature >= n_features {
                            return Err(format!("tree {} node {}: feature {} out of range", t, i, feature));
                        }
                        if !threshold.is_finite() {
                            return Err(format!("tree {} node {}: threshold is not finite", t, i));
                        }
                        // Children after parents keeps every walk acyclic
                        for child in [left, right] {
                            if *child <= i || *child >= tree.nodes.len() {
                                return Err(format!("tree {} node {}: bad child index {}", t, i, child));
                            }
                        }
                    }
                    TreeNode::Leaf { value, .. } => {
                        if value.len() != self.n_classes {
                            return Err(format!(
                                "tree {} node {}: leaf has {} class values, expected {}",
                                t, i, value.len(), self.n_classes
                            ));
                        }
                        if value.iter().any(|v| !v.is_finite()) {
                            return Err(format!("tree {} node {}: leaf value is not finite", t, i));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn check_width(&self, rows: &ArrayView2<'_, f64>) -> ScoringResult<()> {
        if rows.ncols() != self.feature_names.len() {
            return Err(ScoringError::SchemaMismatch {
                expected: self.feature_names.clone(),
                actual: (0..rows.ncols()).map(|i| format!("column_{}", i)).collect(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// TREE WALKS
// ============================================================================

impl DecisionTree {
    /// Add `weight * E[tree(x) | x_S]` into `out`, where S is `mask`.
    /// A full mask reduces to the ordinary prediction.
    fn accumulate(&self, x: &ArrayView1<'_, f64>, mask: u32, weight: f64, out: &mut [f64]) {
        self.accumulate_from(0, x, mask, weight, out);
    }

    fn accumulate_from(&self, node: usize, x: &ArrayView1<'_, f64>, mask: u32, weight: f64, out: &mut [f64]) {
        match &self.nodes[node] {
            TreeNode::Leaf { value, .. } => {
                for (acc, v) in out.iter_mut().zip(value) {
                    *acc += weight * v;
                }
            }
            TreeNode::Split { feature, threshold, left, right, .. } => {
                if mask & (1u32 << *feature) != 0 {
                    let next = if x[*feature] <= *threshold { *left } else { *right };
                    self.accumulate_from(next, x, mask, weight, out);
                } else {
                    let left_cover = self.nodes[*left].cover();
                    let right_cover = self.nodes[*right].cover();
                    let total = left_cover + right_cover;
                    self.accumulate_from(*left, x, mask, weight * left_cover / total, out);
                    self.accumulate_from(*right, x, mask, weight * right_cover / total, out);
                }
            }
        }
    }
}

impl TreeEnsemble {
    /// Ensemble conditional expectation for one instance and feature subset
    fn conditional_expectation(&self, x: &ArrayView1<'_, f64>, mask: u32) -> Vec<f64> {
        let mut out = vec![0.0; self.n_classes];
        let weight = 1.0 / self.trees.len() as f64;
        for tree in &self.trees {
            tree.accumulate(x, mask, weight, &mut out);
        }
        out
    }

    /// Cover-weighted mean prediction (empty subset), per class
    pub fn expected_values(&self) -> Vec<f64> {
        let x = ndarray::Array1::<f64>::zeros(self.feature_names.len());
        self.conditional_expectation(&x.view(), 0)
    }

    fn full_mask(&self) -> u32 {
        (1u32 << self.feature_names.len()) - 1
    }
}

/// Shapley kernel weight |S|! (n-|S|-1)! / n! for each subset size
fn shapley_weights(n: usize) -> Vec<f64> {
    let factorial = |k: usize| (1..=k).map(|v| v as f64).product::<f64>();
    let n_fact = factorial(n);
    (0..n).map(|s| factorial(s) * factorial(n - s - 1) / n_fact).collect()
}

// ============================================================================
// CLASSIFIER IMPLEMENTATION
// ============================================================================

impl Classifier for TreeEnsemble {
    fn model_type(&self) -> &str {
        "tree_ensemble"
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_proba(&self, rows: ArrayView2<'_, f64>) -> ScoringResult<Array2<f64>> {
        self.check_width(&rows)?;

        let full = self.full_mask();
        let mut proba = Array2::<f64>::zeros((rows.nrows(), self.n_classes));
        for (i, x) in rows.outer_iter().enumerate() {
            let p = self.conditional_expectation(&x, full);
            for (c, value) in p.into_iter().enumerate() {
                proba[[i, c]] = value;
            }
        }
        Ok(proba)
    }

    fn shap_values(&self, rows: ArrayView2<'_, f64>) -> ScoringResult<RawExplanation> {
        self.check_width(&rows)?;

        let n_features = self.feature_names.len();
        let n_subsets = 1usize << n_features;
        let weights = shapley_weights(n_features);
        let mut values = vec![Array2::<f64>::zeros((rows.nrows(), n_features)); self.n_classes];

        for (i, x) in rows.outer_iter().enumerate() {
            let lattice: Vec<Vec<f64>> = (0..n_subsets)
                .map(|mask| self.conditional_expectation(&x, mask as u32))
                .collect();

            for feature in 0..n_features {
                let bit = 1usize << feature;
                for mask in (0..n_subsets).filter(|m| m & bit == 0) {
                    let w = weights[mask.count_ones() as usize];
                    let with = &lattice[mask | bit];
                    let without = &lattice[mask];
                    for (c, class_values) in values.iter_mut().enumerate() {
                        class_values[[i, feature]] += w * (with[c] - without[c]);
                    }
                }
            }
        }

        Ok(RawExplanation::PerClass {
            values,
            expected_values: self.expected_values(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::logic::features::FEATURE_LAYOUT;
    use ndarray::Array2;

    /// Two small trees over the production layout.
    /// Tree 0 splits on likes then hashtag; tree 1 splits on comments.
    pub(crate) fn sample_forest_json() -> String {
        serde_json::json!({
            "format_version": 1,
            "feature_names": FEATURE_LAYOUT,
            "n_classes": 2,
            "trees": [
                { "nodes": [
                    { "feature": 0, "threshold": 40.0, "left": 1, "right": 2, "cover": 100.0 },
                    { "value": [0.9, 0.1], "cover": 40.0 },
                    { "feature": 7, "threshold": 0.5, "left": 3, "right": 4, "cover": 60.0 },
                    { "value": [0.5, 0.5], "cover": 30.0 },
                    { "value": [0.2, 0.8], "cover": 30.0 }
                ] },
                { "nodes": [
                    { "feature": 1, "threshold": 8.0, "left": 1, "right": 2, "cover": 100.0 },
                    { "value": [0.7, 0.3], "cover": 50.0 },
                    { "value": [0.4, 0.6], "cover": 50.0 }
                ] }
            ]
        })
        .to_string()
    }

    pub(crate) fn sample_forest() -> TreeEnsemble {
        TreeEnsemble::from_slice(sample_forest_json().as_bytes()).unwrap()
    }

    fn row(values: [f64; 8]) -> Array2<f64> {
        Array2::from_shape_vec((1, 8), values.to_vec()).unwrap()
    }

    #[test]
    fn test_predict_proba_walks_trees() {
        let forest = sample_forest();
        // likes > 40, hashtag optimal, comments > 8 → (0.8 + 0.6) / 2
        let x = row([50.0, 10.0, 5.0, 20.0, 0.6, 12.0, 1.0, 1.0]);
        let proba = forest.predict_proba(x.view()).unwrap();
        assert!((proba[[0, 1]] - 0.7).abs() < 1e-12);
        assert!((proba[[0, 0]] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_expected_value_is_cover_weighted() {
        let forest = sample_forest();
        // tree 0: 0.4*0.1 + 0.3*0.5 + 0.3*0.8 = 0.43; tree 1: 0.45
        let expected = forest.expected_values();
        assert!((expected[1] - 0.44).abs() < 1e-12);
        assert!((expected[0] + expected[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_shap_values_are_additive() {
        let forest = sample_forest();
        for x in [
            row([50.0, 10.0, 5.0, 20.0, 0.6, 12.0, 1.0, 1.0]),
            row([10.0, 2.0, 0.0, 0.0, 0.1, 9.0, 0.0, 0.0]),
            row([45.0, 8.0, 1.0, 1.0, 1.0, 14.0, 1.0, 0.0]),
        ] {
            let proba = forest.predict_proba(x.view()).unwrap();
            let RawExplanation::PerClass { values, expected_values } = forest.shap_values(x.view()).unwrap() else {
                panic!("forest explains per class");
            };
            for class in 0..2 {
                let total = expected_values[class] + values[class].row(0).sum();
                assert!((total - proba[[0, class]]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_unused_features_get_zero_attribution() {
        let forest = sample_forest();
        let x = row([50.0, 10.0, 5.0, 20.0, 0.6, 12.0, 1.0, 1.0]);
        let RawExplanation::PerClass { values, .. } = forest.shap_values(x.view()).unwrap() else {
            panic!("forest explains per class");
        };
        for feature in [2, 3, 4, 5, 6] {
            assert_eq!(values[1][[0, feature]], 0.0);
        }
        // Single-split tree: comments owns the whole deviation of tree 1
        assert!((values[1][[0, 1]] - (0.6 - 0.45) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_child_index() {
        let json = serde_json::json!({
            "format_version": 1,
            "feature_names": FEATURE_LAYOUT,
            "n_classes": 2,
            "trees": [{ "nodes": [
                { "feature": 0, "threshold": 1.0, "left": 0, "right": 1, "cover": 10.0 },
                { "value": [0.5, 0.5], "cover": 5.0 }
            ] }]
        });
        let err = TreeEnsemble::from_slice(json.to_string().as_bytes()).unwrap_err();
        assert!(matches!(err, ScoringError::ModelUnavailable(_)));
    }

    #[test]
    fn test_rejects_wrong_leaf_width() {
        let json = serde_json::json!({
            "format_version": 1,
            "feature_names": FEATURE_LAYOUT,
            "n_classes": 2,
            "trees": [{ "nodes": [{ "value": [1.0], "cover": 5.0 }] }]
        });
        assert!(TreeEnsemble::from_slice(json.to_string().as_bytes()).is_err());
    }

    #[test]
    fn test_rejects_unknown_format_version() {
        let json = sample_forest_json().replace("\"format_version\":1", "\"format_version\":9");
        let err = TreeEnsemble::from_slice(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("format"));
    }

    #[test]
    fn test_wrong_column_count_is_schema_mismatch() {
        let forest = sample_forest();
        let x = Array2::<f64>::zeros((1, 7));
        assert!(matches!(
            forest.predict_proba(x.view()),
            Err(ScoringError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_shapley_weights_sum_per_feature() {
        // Σ_S w(|S|) over subsets excluding one feature is 1
        let n = 8;
        let weights = shapley_weights(n);
        let binom = |k: usize| (0..k).fold(1.0, |acc, i| acc * (n - 1 - i) as f64 / (i + 1) as f64);
        let total: f64 = (0..n).map(|s| binom(s) * weights[s]).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }
}
