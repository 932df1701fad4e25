//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.

/// Default model artifact path (relative to the working directory)
pub const DEFAULT_MODEL_PATH: &str = "model.json";

/// Default relative tolerance for the attribution additivity check
pub const DEFAULT_ATTRIBUTION_TOLERANCE: f64 = 1e-4;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Engagement Quality Predictor";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model artifact path from environment or use default
pub fn get_model_path() -> String {
    std::env::var("ENGAGEMENT_MODEL_PATH")
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Explicit checksum sidecar path, if configured
pub fn get_checksum_path() -> Option<String> {
    std::env::var("ENGAGEMENT_MODEL_CHECKSUM")
        .ok()
        .filter(|s| !s.trim().is_empty())
}

/// Get attribution tolerance from environment or use default
pub fn get_attribution_tolerance() -> f64 {
    std::env::var("ENGAGEMENT_ATTRIBUTION_TOLERANCE")
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|t| t.is_finite() && *t > 0.0)
        .unwrap_or(DEFAULT_ATTRIBUTION_TOLERANCE)
}

/// Check if attribution breakdowns are enabled
pub fn is_explain_enabled() -> bool {
    std::env::var("ENGAGEMENT_EXPLAIN")
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(true)
}
