//! Normalized-case JSON writer.
//!
//! Writes the normalized cases of a run, with their expanded timelines, to a
//! versioned JSON document.

use super::{ensure_parent_dir, validate_path};
use crate::timeline::NormalizedCase;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Top-level structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDocument {
    /// Schema version for compatibility checking
    pub version: String,

    /// Term filters the cases were fetched with
    pub terms: Vec<String>,

    /// Offset applied before calendar conversion, in seconds
    pub tz_offset_secs: i64,

    /// Timestamp when the document was generated
    pub generated_at: String,

    pub cases: Vec<NormalizedCase>,
}

impl CaseDocument {
    pub fn new(terms: Vec<String>, tz_offset_secs: i64, cases: Vec<NormalizedCase>) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            terms,
            tz_offset_secs,
            generated_at: chrono::Utc::now().to_rfc3339(),
            cases,
        }
    }

    pub fn total_events(&self) -> usize {
        self.cases.iter().map(|case| case.timeline.len()).sum()
    }
}

/// Write normalized cases to a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_cases(document: &CaseDocument, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing {} normalized cases to: {}", document.cases.len(), output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, document).map_err(OutputError::SerializationFailed)?;

    info!(
        "Cases written successfully ({} bytes)",
        std::fs::metadata(output_path).map(|m| m.len()).unwrap_or(0)
    );

    Ok(())
}

/// Read a normalized-case document back
pub fn read_cases(input_path: impl AsRef<Path>) -> Result<CaseDocument, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading cases from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let document: CaseDocument =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Document loaded: version {}, {} cases",
        document.version,
        document.cases.len()
    );

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RawCase, RawEvent};
    use crate::timeline::{normalize, NormalizeOptions};
    use tempfile::NamedTempFile;

    fn create_test_document() -> CaseDocument {
        let raw = RawCase {
            id: Some(1),
            href: Some("h".to_string()),
            name: "A v. B".to_string(),
            timeline: vec![
                Some(RawEvent::new("Argued", vec![1_000_000])),
                Some(RawEvent::new("Decided", vec![1_090_000])),
            ],
            ..Default::default()
        };
        let case = normalize(&raw, &NormalizeOptions::default()).unwrap();
        CaseDocument::new(vec!["1789-1850".to_string()], 18_000, vec![case])
    }

    #[test]
    fn test_write_and_read_cases() {
        let document = create_test_document();
        let temp_file = NamedTempFile::new().unwrap();

        write_cases(&document, temp_file.path()).unwrap();
        let loaded = read_cases(temp_file.path()).unwrap();

        assert_eq!(loaded, document);
        assert_eq!(loaded.total_events(), 2);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/cases.json");

        write_cases(&create_test_document(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
