//! Feature Vector - Core data structure for model input
//!
//! **Versioned feature vector with layout validation**
//!
//! Uses centralized layout from `layout.rs` for:
//! - Consistent feature ordering
//! - Version tracking
//! - Layout hash for compatibility checks
//!
//! A `FeatureVector` can only be produced through [`FeatureVector::from_named`]
//! (or the builder on top of it), which rejects any key set or order that
//! differs from the locked layout. Once built it is immutable.

use serde::Serialize;

use super::layout::{layout_hash, layout_names, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
use crate::logic::error::{ScoringError, ScoringResult};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    /// Feature layout version
    version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Build from `(name, value)` entries that must follow the locked layout
    /// exactly. Never pads or truncates.
    pub fn from_named<S: AsRef<str>>(entries: &[(S, f64)]) -> ScoringResult<Self> {
        let names_match = entries.len() == FEATURE_COUNT
            && entries
                .iter()
                .zip(FEATURE_LAYOUT)
                .all(|((name, _), expected)| AsRef::<str>::as_ref(name) == *expected);

        if !names_match {
            return Err(ScoringError::SchemaMismatch {
                expected: layout_names(),
                actual: entries.iter().map(|(n, _)| AsRef::<str>::as_ref(n).to_string()).collect(),
            });
        }

        let mut values = [0.0f64; FEATURE_COUNT];
        for (i, (_, value)) in entries.iter().enumerate() {
            if !value.is_finite() {
                return Err(ScoringError::InputOutOfRange {
                    field: FEATURE_LAYOUT[i],
                    value: *value,
                    min: f64::MIN,
                    max: f64::MAX,
                });
            }
            values[i] = *value;
        }

        Ok(Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn layout_hash(&self) -> u32 {
        self.layout_hash
    }

    /// Get values as array reference
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    /// `(name, value)` pairs in layout order
    pub fn named_values(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_LAYOUT.iter().copied().zip(self.values.iter().copied())
    }

    /// Check this vector against the current layout
    pub fn is_compatible(&self) -> bool {
        self.version == FEATURE_VERSION && self.layout_hash == layout_hash()
    }

    pub fn feature_names(&self) -> &'static [&'static str] {
        FEATURE_LAYOUT
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": self.version,
            "layout_hash": self.layout_hash,
            "values": self.values,
            "named_values": self.named_values()
                .map(|(name, value)| (name.to_string(), value))
                .collect::<std::collections::BTreeMap<_, _>>(),
        })
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureVector with named setters.
///
/// Entries are kept in call order, so a builder driven out of layout order
/// fails the schema check in `build`.
#[derive(Debug, Default)]
pub struct FeatureVectorBuilder {
    entries: Vec<(&'static str, f64)>,
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn likes_per_10k_reach(self, value: f64) -> Self {
        self.set("likes_per_10k_reach", value)
    }

    pub fn comments_per_10k_reach(self, value: f64) -> Self {
        self.set("comments_per_10k_reach", value)
    }

    pub fn shares_per_10k_reach(self, value: f64) -> Self {
        self.set("shares_per_10k_reach", value)
    }

    pub fn saves_per_10k_reach(self, value: f64) -> Self {
        self.set("saves_per_10k_reach", value)
    }

    pub fn active_passive_ratio(self, value: f64) -> Self {
        self.set("active_passive_ratio", value)
    }

    pub fn log_reach_win(self, value: f64) -> Self {
        self.set("log_reach_win", value)
    }

    pub fn caption_bucket_medium(self, value: f64) -> Self {
        self.set("caption_bucket_medium", value)
    }

    pub fn hashtag_bucket_optimal(self, value: f64) -> Self {
        self.set("hashtag_bucket_optimal", value)
    }

    /// Set feature by name dynamically
    pub fn set(mut self, name: &'static str, value: f64) -> Self {
        self.entries.push((name, value));
        self
    }

    pub fn build(self) -> ScoringResult<FeatureVector> {
        FeatureVector::from_named(&self.entries)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn full_builder() -> FeatureVectorBuilder {
        FeatureVectorBuilder::new()
            .likes_per_10k_reach(50.0)
            .comments_per_10k_reach(10.0)
            .shares_per_10k_reach(5.0)
            .saves_per_10k_reach(20.0)
            .active_passive_ratio(0.6)
            .log_reach_win(12.0)
            .caption_bucket_medium(1.0)
            .hashtag_bucket_optimal(0.0)
    }

    #[test]
    fn test_builder_in_layout_order() {
        let vector = full_builder().build().unwrap();
        assert_eq!(vector.version(), FEATURE_VERSION);
        assert_eq!(vector.layout_hash(), layout_hash());
        assert!(vector.is_compatible());
        assert_eq!(vector.get_by_name("log_reach_win"), Some(12.0));
        assert_eq!(vector.get_by_name("caption_bucket_medium"), Some(1.0));
    }

    #[test]
    fn test_missing_feature_is_schema_mismatch() {
        let result = FeatureVectorBuilder::new()
            .likes_per_10k_reach(50.0)
            .build();

        match result {
            Err(ScoringError::SchemaMismatch { expected, actual }) => {
                assert_eq!(expected.len(), FEATURE_COUNT);
                assert_eq!(actual, vec!["likes_per_10k_reach".to_string()]);
            }
            other => panic!("Expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_order_is_schema_mismatch() {
        let result = FeatureVectorBuilder::new()
            .comments_per_10k_reach(10.0)
            .likes_per_10k_reach(50.0)
            .shares_per_10k_reach(5.0)
            .saves_per_10k_reach(20.0)
            .active_passive_ratio(0.6)
            .log_reach_win(12.0)
            .caption_bucket_medium(1.0)
            .hashtag_bucket_optimal(0.0)
            .build();

        assert!(matches!(result, Err(ScoringError::SchemaMismatch { .. })));
    }

    #[test]
    fn test_extra_feature_is_schema_mismatch() {
        let result = full_builder().set("caption_bucket_long", 0.0).build();
        assert!(matches!(result, Err(ScoringError::SchemaMismatch { .. })));
    }

    #[test]
    fn test_non_finite_value_rejected() {
        let result = FeatureVectorBuilder::new()
            .likes_per_10k_reach(f64::NAN)
            .comments_per_10k_reach(10.0)
            .shares_per_10k_reach(5.0)
            .saves_per_10k_reach(20.0)
            .active_passive_ratio(0.6)
            .log_reach_win(12.0)
            .caption_bucket_medium(1.0)
            .hashtag_bucket_optimal(0.0)
            .build();

        assert!(matches!(
            result,
            Err(ScoringError::InputOutOfRange { field: "likes_per_10k_reach", .. })
        ));
    }

    #[test]
    fn test_named_values_follow_layout() {
        let vector = full_builder().build().unwrap();
        let names: Vec<&str> = vector.named_values().map(|(n, _)| n).collect();
        assert_eq!(names, FEATURE_LAYOUT);
    }

    #[test]
    fn test_to_log_entry() {
        let vector = full_builder().build().unwrap();
        let log = vector.to_log_entry();
        assert_eq!(log["feature_version"], FEATURE_VERSION);
        assert!(log["layout_hash"].as_u64().is_some());
        assert_eq!(log["named_values"]["likes_per_10k_reach"], 50.0);
    }
}
