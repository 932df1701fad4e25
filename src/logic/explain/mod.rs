//! Explain Module - Local attribution records for single predictions

pub mod engine;
pub mod types;

pub use engine::{build_attribution, check_additivity};
pub use types::{Attribution, AttributionInconsistent, AttributionRecord, FeatureContribution};
