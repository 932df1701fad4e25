//! Model Module - Served classifier behind the adapter
//!
//! Tách classifier khỏi pipeline: the pipeline only sees [`ModelAdapter`],
//! so the artifact format or model family can change behind it.

pub mod adapter;
pub mod artifact;
pub mod classifier;
pub mod forest;
#[cfg(test)]
pub(crate) mod testing;

// Re-export common types
pub use adapter::{normalize_explanation, EngineStatus, ModelAdapter, ModelMetadata};
pub use classifier::{Classifier, Explanation, RawExplanation, POSITIVE_CLASS};
pub use forest::TreeEnsemble;
