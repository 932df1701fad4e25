//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the feature schema the classifier was trained on.**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! A model artifact trained on a different layout must be rejected at load.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Engagement rates (0-3) ===
    "likes_per_10k_reach",      // 0
    "comments_per_10k_reach",   // 1
    "shares_per_10k_reach",     // 2
    "saves_per_10k_reach",      // 3

    // === Engagement mix (4-5) ===
    "active_passive_ratio",     // 4: (comments + shares + saves) vs likes
    "log_reach_win",            // 5: winsorized log reach

    // === Content structure indicators (6-7) ===
    "caption_bucket_medium",    // 6: 1 = Medium caption, 0 = Short/Long
    "hashtag_bucket_optimal",   // 7: 1 = Optimal hashtag usage
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 8;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 of the version byte and every feature name in order
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }

    hasher.finalize()
}

/// Complete layout information for logging and status reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: layout_names(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

/// Owned copy of the layout, for error reports
pub fn layout_names() -> Vec<String> {
    FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect()
}

/// True when `names` is exactly the locked layout, same order
pub fn matches_layout<S: AsRef<str>>(names: &[S]) -> bool {
    names.len() == FEATURE_COUNT
        && names.iter().zip(FEATURE_LAYOUT).all(|(a, b)| AsRef::<str>::as_ref(a) == *b)
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_layout_hash_consistency() {
        assert_eq!(layout_hash(), layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(feature_index("likes_per_10k_reach"), Some(0));
        assert_eq!(feature_index("log_reach_win"), Some(5));
        assert_eq!(feature_index("hashtag_bucket_optimal"), Some(7));
        assert_eq!(feature_index("caption_length"), None);
    }

    #[test]
    fn test_feature_name() {
        assert_eq!(feature_name(6), Some("caption_bucket_medium"));
        assert_eq!(feature_name(8), None);
    }

    #[test]
    fn test_matches_layout_is_order_sensitive() {
        assert!(matches_layout(FEATURE_LAYOUT));

        let mut swapped = layout_names();
        swapped.swap(0, 1);
        assert!(!matches_layout(&swapped));

        let truncated = &FEATURE_LAYOUT[..7];
        assert!(!matches_layout(truncated));
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_names.len(), FEATURE_COUNT);
    }
}
