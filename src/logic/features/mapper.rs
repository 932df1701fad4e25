//! Feature Mapper - PostInputs → FeatureVector
//!
//! Categoricals collapse to the two indicators the model was trained on:
//! - `caption_bucket_medium`: 1 = Medium, 0 = Short or Long
//! - `hashtag_bucket_optimal`: 1 = Optimal, 0 = Suboptimal

use super::inputs::{CaptionLength, HashtagUsage, PostInputs};
use super::vector::{FeatureVector, FeatureVectorBuilder};
use crate::logic::error::ScoringResult;

pub fn caption_indicator(caption: CaptionLength) -> f64 {
    match caption {
        CaptionLength::Medium => 1.0,
        CaptionLength::Short | CaptionLength::Long => 0.0,
    }
}

pub fn hashtag_indicator(usage: HashtagUsage) -> f64 {
    match usage {
        HashtagUsage::Optimal => 1.0,
        HashtagUsage::Suboptimal => 0.0,
    }
}

/// Map raw inputs to the locked feature vector. Pure.
pub fn map_inputs(inputs: &PostInputs) -> ScoringResult<FeatureVector> {
    FeatureVectorBuilder::new()
        .likes_per_10k_reach(inputs.likes)
        .comments_per_10k_reach(inputs.comments)
        .shares_per_10k_reach(inputs.shares)
        .saves_per_10k_reach(inputs.saves)
        .active_passive_ratio(inputs.active_passive_ratio)
        .log_reach_win(inputs.log_reach)
        .caption_bucket_medium(caption_indicator(inputs.caption_length))
        .hashtag_bucket_optimal(hashtag_indicator(inputs.hashtag_usage))
        .build()
}
