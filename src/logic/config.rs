//! Scoring Configuration
//!
//! Gathers the env-driven settings from `constants` into one value that is
//! built once at startup and handed to the adapter and the scorer.

use std::path::PathBuf;

use serde::Serialize;

use crate::constants;

#[derive(Debug, Clone, Serialize)]
pub struct ScoringConfig {
    /// Serialized classifier artifact
    pub model_path: PathBuf,

    /// Explicit checksum sidecar; `None` falls back to `<model_path>.sha256` if present
    pub checksum_path: Option<PathBuf>,

    /// Relative tolerance for `base + Σ contributions ≈ probability`
    pub attribution_tolerance: f64,

    /// Build attribution records (kill-switch for the explainer)
    pub explain_enabled: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(constants::DEFAULT_MODEL_PATH),
            checksum_path: None,
            attribution_tolerance: constants::DEFAULT_ATTRIBUTION_TOLERANCE,
            explain_enabled: true,
        }
    }
}

impl ScoringConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            model_path: PathBuf::from(constants::get_model_path()),
            checksum_path: constants::get_checksum_path().map(PathBuf::from),
            attribution_tolerance: constants::get_attribution_tolerance(),
            explain_enabled: constants::is_explain_enabled(),
        }
    }

    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    pub fn with_explain(mut self, enabled: bool) -> Self {
        self.explain_enabled = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScoringConfig::default();
        assert_eq!(config.model_path, PathBuf::from("model.json"));
        assert!(config.checksum_path.is_none());
        assert_eq!(config.attribution_tolerance, 1e-4);
        assert!(config.explain_enabled);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ScoringConfig::default()
            .with_model_path("/srv/models/engagement.json")
            .with_explain(false);
        assert_eq!(config.model_path, PathBuf::from("/srv/models/engagement.json"));
        assert!(!config.explain_enabled);
    }
}
