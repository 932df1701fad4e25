//! Engagement Quality Core
//!
//! Scores a single post's engagement signals, ranks the score against the
//! session's earlier predictions, and explains it feature by feature.

pub mod api;
pub mod constants;
pub mod logic;

pub use logic::config::ScoringConfig;
pub use logic::error::{ScoringError, ScoringResult};
pub use logic::explain::{AttributionInconsistent, AttributionRecord, FeatureContribution};
pub use logic::features::{CaptionLength, FeatureVector, HashtagUsage, PostInputs};
pub use logic::model::ModelAdapter;
pub use logic::pipeline::{Assessment, PredictionResult, Scorer};
pub use logic::rank::{SessionContext, SharedSession};
pub use logic::verdict::Verdict;
