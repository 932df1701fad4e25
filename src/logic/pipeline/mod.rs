//! Assessment Pipeline - Inputs → probability, rank, verdict, attribution
//!
//! Flow:
//! 1. Map inputs to the locked feature vector
//! 2. Predict the positive-class probability
//! 3. Explain it (when enabled)
//! 4. Record the probability in the session and rank it
//! 5. Classify the rank and assemble the attribution record
//!
//! Steps 1-3 can fail and touch nothing; the session history is only
//! mutated once every fallible step has succeeded.


use std::sync::Arc;

use serde::Serialize;

use crate::logic::config::ScoringConfig;
use crate::logic::error::ScoringResult;
use crate::logic::explain::{build_attribution, AttributionInconsistent, AttributionRecord};
use crate::logic::features::{map_inputs, FeatureVector, PostInputs};
use crate::logic::model::ModelAdapter;
use crate::logic::rank::SessionContext;
use crate::logic::verdict::Verdict;

/// Scored outcome of one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub probability: f64,
    pub verdict: Verdict,
    pub rank: f64,
}

/// Everything the output boundary renders for one interaction
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub features: FeatureVector,
    pub prediction: PredictionResult,
    pub attribution: Option<AttributionRecord>,
    pub attribution_warning: Option<AttributionInconsistent>,
}

/// Request handler. Holds the shared read-only model; sessions come in
/// per call.
#[derive(Debug, Clone)]
pub struct Scorer {
    adapter: Arc<ModelAdapter>,
    attribution_tolerance: f64,
    explain_enabled: bool,
}

impl Scorer {
    pub fn new(adapter: Arc<ModelAdapter>, config: &ScoringConfig) -> Self {
        Self {
            adapter,
            attribution_tolerance: config.attribution_tolerance,
            explain_enabled: config.explain_enabled,
        }
    }

    pub fn adapter(&self) -> &ModelAdapter {
        &self.adapter
    }

    pub fn assess(&self, session: &mut SessionContext, inputs: &PostInputs) -> ScoringResult<Assessment> {
        let features = map_inputs(inputs)?;
        log::debug!("Features: {}", features.to_log_entry());

        let probability = self.adapter.predict_probability(&features)?;
        let explanation = if self.explain_enabled {
            Some(self.adapter.explain(&features)?)
        } else {
            None
        };

        let rank = session.record_and_rank(probability);
        let verdict = Verdict::from_rank(rank);

        let (attribution, attribution_warning) = match explanation {
            Some(explanation) => {
                let built = build_attribution(&features, &explanation, probability, self.attribution_tolerance);
                (Some(built.record), built.warning)
            }
            None => (None, None),
        };

        log::info!(
            "Assessment: p={:.4} rank={:.3} verdict={} (session {}, n={})",
            probability,
            rank,
            verdict,
            session.id(),
            session.history().len()
        );

        Ok(Assessment {
            features,
            prediction: PredictionResult { probability, verdict, rank },
            attribution,
            attribution_warning,
        })
    }
}
