//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while talking to the Oyez API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid API response for term {term}: {reason}")]
    InvalidResponse { term: String, reason: String },
}

/// Errors that can occur while normalizing a case timeline
#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("Malformed case '{name}': missing {missing}")]
    MalformedCase { name: String, missing: &'static str },

    #[error("Timestamp {timestamp} (offset {offset}s) is outside the representable calendar range")]
    InvalidTimestamp { timestamp: i64, offset: i64 },
}

/// Errors that can occur while writing to the relational store
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Cannot create database directory: {0}")]
    Directory(#[from] std::io::Error),

    #[error("Failed to store case {case_id}: {source}")]
    CaseWrite {
        case_id: i64,
        #[source]
        source: rusqlite::Error,
    },
}

/// Errors that can occur during chart rendering
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("No eras to plot")]
    NoEras,

    #[error("No {0} samples in any era")]
    NoSamples(&'static str),
}

/// Errors that can occur during file input and output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Malformed CSV at line {line}: {reason}")]
    MalformedCsv { line: usize, reason: String },
}
