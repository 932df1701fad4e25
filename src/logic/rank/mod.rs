//! Rank Module - Session-relative percentile rank of predictions

pub mod history;
pub mod session;

pub use history::{ProbabilityHistory, RankStats};
pub use session::{SessionContext, SessionSummary, SharedSession};
