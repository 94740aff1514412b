//! SCOTUS Norms
//!
//! Work norms of the early U.S. Supreme Court, derived from the
//! per-case timelines published by the Oyez API.
//!
//! This crate provides the core implementation for the
//! `scotus-norms` CLI tool:
//!
//! - [`api`] fetches raw case records per term
//! - [`timeline`] normalizes timelines into dated events and durations
//! - [`db`] persists normalized cases into SQLite
//! - [`aggregator`] folds cases into historical eras
//! - [`charts`] and [`output`] render the results
//!
//! ## Getting Started
//!
//! ```bash
//! scotus-norms collect --db scotus.db --charts-dir charts
//! scotus-norms --help
//! ```

pub mod aggregator;
pub mod api;
pub mod charts;
pub mod commands;
pub mod db;
pub mod output;
pub mod timeline;
pub mod utils;
