//! Timeline normalization.
//!
//! This module handles:
//! - Expanding UNIX timestamps into calendar fields
//! - Normalizing raw cases into storage-ready records
//! - Deriving case, argument and deliberation durations

pub mod expander;
pub mod normalizer;
pub mod schema;

// Re-export main types
pub use expander::{calendar_day_field, expand, TimelineExpander};
pub use normalizer::{normalize, normalize_all, DurationMode, NormalizeOptions};
pub use schema::{CalendarDate, EventKind, NormalizedCase, NormalizedEvent};
