//! Retrieval of raw case records from the Oyez API.

pub mod client;
pub mod types;

// Re-export main types
pub use client::{parse_case_array, CaseSource, OyezClient};
pub use types::{Citation, RawCase, RawEvent};
