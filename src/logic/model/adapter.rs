//! Model Adapter - Served classifier behind one fixed contract
//!
//! Load model một lần lúc startup, share read-only cho mọi request.
//! Exposes the positive-class probability and a normalized explanation
//! over the locked feature layout.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use ndarray::{ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use super::artifact::read_artifact;
use super::classifier::{Classifier, Explanation, RawExplanation, POSITIVE_CLASS};
use super::forest::TreeEnsemble;
use crate::logic::config::ScoringConfig;
use crate::logic::error::{ScoringError, ScoringResult};
use crate::logic::features::layout::{layout_names, matches_layout};
use crate::logic::features::{FeatureVector, FEATURE_COUNT};

/// Probabilities may overshoot [0, 1] by float noise only
const PROBABILITY_SLACK: f64 = 1e-9;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub model_type: String,
    pub features: usize,
    pub tree_count: Option<usize>,
    pub sha256: Option<String>,
    pub checksum_verified: bool,
    pub loaded_at: DateTime<Utc>,
}

impl ModelMetadata {
    /// Metadata for a classifier that did not come from disk
    pub fn in_memory(model_type: &str) -> Self {
        Self {
            model_path: "<memory>".to_string(),
            model_type: model_type.to_string(),
            features: FEATURE_COUNT,
            tree_count: None,
            sha256: None,
            checksum_verified: false,
            loaded_at: Utc::now(),
        }
    }
}

/// Engine status for the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub model_name: String,
    pub model_type: String,
    pub avg_latency_ms: f32,
    pub inference_count: u64,
    pub explanation_count: u64,
}

#[derive(Debug, Default)]
struct InferenceStats {
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
    explanation_count: AtomicU64,
}

// ============================================================================
// ADAPTER
// ============================================================================

pub struct ModelAdapter {
    classifier: Box<dyn Classifier>,
    metadata: ModelMetadata,
    stats: InferenceStats,
}

impl std::fmt::Debug for ModelAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelAdapter")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl ModelAdapter {
    /// Load the configured artifact. Every failure is fatal for the process;
    /// there is no fallback scorer.
    pub fn load(config: &ScoringConfig) -> ScoringResult<Self> {
        Self::load_from_path(&config.model_path, config.checksum_path.as_deref())
    }

    pub fn load_from_path(model_path: &Path, checksum_path: Option<&Path>) -> ScoringResult<Self> {
        let artifact = read_artifact(model_path, checksum_path)?;

        let ensemble = TreeEnsemble::from_slice(&artifact.bytes).map_err(|e| match e {
            ScoringError::ModelUnavailable(_) => e,
            other => ScoringError::ModelUnavailable(format!(
                "cannot parse {}: {}",
                model_path.display(),
                other
            )),
        })?;

        let metadata = ModelMetadata {
            model_path: model_path.display().to_string(),
            model_type: ensemble.model_type().to_string(),
            features: ensemble.feature_names.len(),
            tree_count: Some(ensemble.tree_count()),
            sha256: Some(artifact.sha256),
            checksum_verified: artifact.verified,
            loaded_at: Utc::now(),
        };

        let adapter = Self::from_classifier(Box::new(ensemble), metadata)?;
        log::info!(
            "Model loaded: {} ({} trees, {} features)",
            adapter.metadata.model_path,
            adapter.metadata.tree_count.unwrap_or(0),
            adapter.metadata.features
        );
        Ok(adapter)
    }

    /// Wrap an already-constructed classifier. Rejects schema drift.
    pub fn from_classifier(classifier: Box<dyn Classifier>, metadata: ModelMetadata) -> ScoringResult<Self> {
        if !matches_layout(classifier.feature_names()) {
            return Err(ScoringError::SchemaMismatch {
                expected: layout_names(),
                actual: classifier.feature_names().to_vec(),
            });
        }

        Ok(Self {
            classifier,
            metadata,
            stats: InferenceStats::default(),
        })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Probability of the high-quality class, in [0, 1]
    pub fn predict_probability(&self, features: &FeatureVector) -> ScoringResult<f64> {
        let start_time = Instant::now();

        let proba = self.classifier.predict_proba(input_row(features)?)?;
        if proba.nrows() != 1 || proba.ncols() <= POSITIVE_CLASS {
            return Err(ScoringError::InvalidModelOutput(format!(
                "expected [1, >=2] probabilities, got {:?}",
                proba.shape()
            )));
        }

        let probability = checked_probability(proba[[0, POSITIVE_CLASS]])?;

        self.stats
            .latency_sum_us
            .fetch_add(start_time.elapsed().as_micros() as u64, Ordering::Relaxed);
        self.stats.inference_count.fetch_add(1, Ordering::Relaxed);

        Ok(probability)
    }

    /// Positive-class attribution for this vector
    pub fn explain(&self, features: &FeatureVector) -> ScoringResult<Explanation> {
        let raw = self.classifier.shap_values(input_row(features)?)?;
        let explanation = normalize_explanation(raw, POSITIVE_CLASS)?;
        self.stats.explanation_count.fetch_add(1, Ordering::Relaxed);
        Ok(explanation)
    }

    pub fn status(&self) -> EngineStatus {
        let sum = self.stats.latency_sum_us.load(Ordering::Relaxed);
        let count = self.stats.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        EngineStatus {
            model_loaded: true,
            model_name: self.metadata.model_path.clone(),
            model_type: self.metadata.model_type.clone(),
            avg_latency_ms: avg,
            inference_count: count,
            explanation_count: self.stats.explanation_count.load(Ordering::Relaxed),
        }
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn input_row(features: &FeatureVector) -> ScoringResult<ArrayView2<'_, f64>> {
    ArrayView2::from_shape((1, FEATURE_COUNT), features.as_slice())
        .map_err(|e| ScoringError::InvalidModelOutput(format!("input shape: {}", e)))
}

fn checked_probability(p: f64) -> ScoringResult<f64> {
    if !p.is_finite() || p < -PROBABILITY_SLACK || p > 1.0 + PROBABILITY_SLACK {
        return Err(ScoringError::InvalidModelOutput(format!("probability {} outside [0, 1]", p)));
    }
    Ok(p.clamp(0.0, 1.0))
}

/// Collapse either explainer layout to the `class` slice of instance 0
pub fn normalize_explanation(raw: RawExplanation, class: usize) -> ScoringResult<Explanation> {
    let (values, expected_values) = match raw {
        RawExplanation::PerClass { values, expected_values } => {
            let matrix = values.into_iter().nth(class).ok_or_else(|| {
                ScoringError::InvalidExplanation(format!("no attribution slice for class {}", class))
            })?;
            if matrix.nrows() == 0 {
                return Err(ScoringError::InvalidExplanation("no instances in attribution".to_string()));
            }
            (matrix.row(0).to_vec(), expected_values)
        }
        RawExplanation::Stacked { values, expected_values } => {
            let shape = values.shape().to_vec();
            if shape[0] == 0 || shape[2] <= class {
                return Err(ScoringError::InvalidExplanation(format!(
                    "cannot take [0, :, {}] from tensor of shape {:?}",
                    class, shape
                )));
            }
            let slice = values.index_axis(Axis(2), class);
            (slice.row(0).to_vec(), expected_values)
        }
    };

    if values.len() != FEATURE_COUNT {
        return Err(ScoringError::SchemaMismatch {
            expected: layout_names(),
            actual: (0..values.len()).map(|i| format!("attribution_{}", i)).collect(),
        });
    }

    let base_value = *expected_values.get(class).ok_or_else(|| {
        ScoringError::InvalidExplanation(format!("no expected value for class {}", class))
    })?;

    let mut weights = [0.0f64; FEATURE_COUNT];
    weights.copy_from_slice(&values);

    if !base_value.is_finite() || weights.iter().any(|w| !w.is_finite()) {
        return Err(ScoringError::InvalidExplanation("non-finite attribution".to_string()));
    }

    Ok(Explanation { base_value, weights })
}

// ============================================================================
// TESTS
// ============================================================================
