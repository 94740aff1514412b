//! Aggregation of normalized cases into historical eras.
//!
//! This module turns normalized cases into:
//! - Per-era weekday and month frequency counts
//! - Deliberation-duration samples
//! - Percentages and descriptive statistics for reporting

pub mod eras;
pub mod stats;

// Re-export main types and functions
pub use eras::{default_eras, era_index, fold, fold_all, Era};
pub use stats::{percentages, DurationStats};
