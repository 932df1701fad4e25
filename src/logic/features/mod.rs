//! Features Module - Feature Mapping Engine
//!
//! Turns raw post inputs into the locked feature vector the classifier
//! was trained on. Layout changes happen in `layout.rs` only.

pub mod inputs;
pub mod layout;
pub mod mapper;
pub mod vector;

// Re-export common types
pub use inputs::{CaptionLength, HashtagUsage, InputBound, PostInputs, INPUT_BOUNDS};
pub use layout::{feature_index, feature_name, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT};
pub use mapper::map_inputs;
pub use vector::{FeatureVector, FeatureVectorBuilder};
