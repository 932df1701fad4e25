//! Logic Module - Scoring & Ranking Engines
//!
//! ## Architecture
//! - `features/` - Input boundary types and feature mapping
//! - `model/` - Served classifier, artifact loading, explanation normalization
//! - `rank/` - Session history and percentile rank
//! - `verdict` - Rank → LOW / MODERATE / HIGH
//! - `explain/` - Attribution records
//! - `pipeline/` - One synchronous assessment per interaction

pub mod config;
pub mod error;

pub mod explain;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod rank;
pub mod verdict;
