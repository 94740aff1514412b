//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod collect;
pub mod extract;
pub mod report;

// Re-export main command functions
pub use collect::{
    collect_with_source, execute_collect, resolve_terms, validate_args, CollectArgs, CollectSummary,
};
pub use extract::{execute_extract, extract_with_source, validate_extract_args, ExtractArgs};
pub use report::{format_report, format_totals};
