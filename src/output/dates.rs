//! Case date table: CSV and JSON forms.
//!
//! Rows carry the term year, the case title and the first Granted, Argued
//! and Decided dates (`YYYY-MM-DD`, or `0` when the case never got there).
//! The CSV is `", "` separated with the title quoted:
//!
//! ```text
//! Year, Title, Date_Granted, Date_Argued, Date_Decided
//! 2017, "Class v. United States", 2017-02-21, 2017-10-04, 2018-02-21
//! ```

use super::{ensure_parent_dir, validate_path};
use crate::api::RawCase;
use crate::timeline::{EventKind, TimelineExpander};
use crate::utils::config::MISSING_DATE;
use crate::utils::error::OutputError;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const CSV_HEADER: &str = "Year, Title, Date_Granted, Date_Argued, Date_Decided";

/// One row of the date table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Date_Granted")]
    pub date_granted: String,
    #[serde(rename = "Date_Argued")]
    pub date_argued: String,
    #[serde(rename = "Date_Decided")]
    pub date_decided: String,
}

impl DateRecord {
    /// Build a row from a raw case; the first date of each event counts and
    /// a later event with the same label overwrites an earlier one
    pub fn from_raw_case(year: i32, raw: &RawCase, expander: &TimelineExpander) -> Self {
        let mut record = Self {
            year,
            title: raw.name.clone(),
            date_granted: MISSING_DATE.to_string(),
            date_argued: MISSING_DATE.to_string(),
            date_decided: MISSING_DATE.to_string(),
        };

        for raw_event in raw.timeline.iter().flatten() {
            let kind = EventKind::from_label(&raw_event.event);
            let slot = match &kind {
                EventKind::Argued => &mut record.date_argued,
                EventKind::Decided => &mut record.date_decided,
                EventKind::Other(label) if label == "Granted" => &mut record.date_granted,
                _ => continue,
            };

            let Some(&first) = raw_event.dates.first() else {
                continue;
            };

            match expander.expand(first) {
                Ok(date) => *slot = date.iso_date(),
                Err(e) => warn!("Skipping {} date of '{}': {}", kind, raw.name, e),
            }
        }

        record
    }

    fn to_csv_line(&self) -> String {
        format!(
            "{}, \"{}\", {}, {}, {}",
            self.year,
            self.title.replace('"', "\"\""),
            self.date_granted,
            self.date_argued,
            self.date_decided
        )
    }
}

/// Render rows as CSV text, header included
pub fn to_csv_string(records: &[DateRecord]) -> String {
    let mut out = String::with_capacity(64 * (records.len() + 1));
    out.push_str(CSV_HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&record.to_csv_line());
        out.push('\n');
    }
    out
}

/// Parse CSV text produced by `to_csv_string`
///
/// Leading spaces after separators are ignored and quoted fields may hold
/// commas, doubled quotes and line breaks.
pub fn parse_csv_str(content: &str) -> Result<Vec<DateRecord>, OutputError> {
    let mut rows = split_records(content)?.into_iter();

    match rows.next() {
        Some((_, header)) if header.join(", ") == CSV_HEADER => {}
        Some((line, header)) => {
            return Err(OutputError::MalformedCsv {
                line,
                reason: format!("unexpected header '{}'", header.join(", ")),
            })
        }
        None => {
            return Err(OutputError::MalformedCsv {
                line: 1,
                reason: "empty file".to_string(),
            })
        }
    }

    let mut records = Vec::new();
    for (line_no, fields) in rows {
        let [year, title, granted, argued, decided]: [String; 5] =
            fields.try_into().map_err(|fields: Vec<String>| OutputError::MalformedCsv {
                line: line_no,
                reason: format!("expected 5 fields, found {}", fields.len()),
            })?;

        let year = year.trim().parse().map_err(|_| OutputError::MalformedCsv {
            line: line_no,
            reason: format!("invalid year '{}'", year),
        })?;

        records.push(DateRecord {
            year,
            title,
            date_granted: granted,
            date_argued: argued,
            date_decided: decided,
        });
    }

    Ok(records)
}

/// Split content into records, each tagged with the line it starts on
///
/// Blank lines are skipped.
fn split_records(content: &str) -> Result<Vec<(usize, Vec<String>)>, OutputError> {
    let mut records = Vec::new();
    let mut chars = content.chars().peekable();
    let mut line_no = 1;

    while chars.peek().is_some() {
        let start_line = line_no;
        let mut fields = Vec::new();

        loop {
            while chars.peek() == Some(&' ') {
                chars.next();
            }

            let mut field = String::new();
            if chars.peek() == Some(&'"') {
                chars.next();
                loop {
                    match chars.next() {
                        Some('"') if chars.peek() == Some(&'"') => {
                            chars.next();
                            field.push('"');
                        }
                        Some('"') => break,
                        Some(c) => {
                            if c == '\n' {
                                line_no += 1;
                            }
                            field.push(c);
                        }
                        None => {
                            return Err(OutputError::MalformedCsv {
                                line: start_line,
                                reason: "unterminated quoted field".to_string(),
                            })
                        }
                    }
                }
                while let Some(&c) = chars.peek() {
                    if c == ',' || c == '\n' {
                        break;
                    }
                    chars.next();
                }
            } else {
                while let Some(&c) = chars.peek() {
                    if c == ',' || c == '\n' {
                        break;
                    }
                    field.push(c);
                    chars.next();
                }
                field.truncate(field.trim_end().len());
            }

            fields.push(field);
            match chars.next() {
                Some(',') => continue,
                Some('\n') => {
                    line_no += 1;
                    break;
                }
                _ => break,
            }
        }

        let blank = fields.len() == 1 && fields[0].is_empty();
        if !blank {
            records.push((start_line, fields));
        }
    }

    Ok(records)
}

/// Write rows to a CSV file
pub fn write_csv(records: &[DateRecord], output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Saving {} rows to CSV: {}", records.len(), output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let mut writer = BufWriter::new(File::create(output_path)?);
    writer.write_all(to_csv_string(records).as_bytes())?;
    writer.flush()?;
    Ok(())
}

pub fn read_csv(input_path: impl AsRef<Path>) -> Result<Vec<DateRecord>, OutputError> {
    let input_path = input_path.as_ref();
    debug!("Reading CSV: {}", input_path.display());
    parse_csv_str(&std::fs::read_to_string(input_path)?)
}

/// Write rows as a JSON array of records
pub fn write_json(records: &[DateRecord], output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer(writer, records)?;
    Ok(())
}

pub fn read_json(input_path: impl AsRef<Path>) -> Result<Vec<DateRecord>, OutputError> {
    let input_path = input_path.as_ref();
    debug!("Reading JSON: {}", input_path.display());
    let file = File::open(input_path)?;
    Ok(serde_json::from_reader(file)?)
}

/// Convert a CSV file to JSON, returning the row count
pub fn csv_to_json(infile: impl AsRef<Path>, outfile: impl AsRef<Path>) -> Result<usize, OutputError> {
    let records = read_csv(&infile)?;
    write_json(&records, &outfile)?;
    info!(
        "Converted CSV file ({}) to JSON ({})",
        infile.as_ref().display(),
        outfile.as_ref().display()
    );
    Ok(records.len())
}

/// Convert a JSON file to CSV, returning the row count
pub fn json_to_csv(infile: impl AsRef<Path>, outfile: impl AsRef<Path>) -> Result<usize, OutputError> {
    let records = read_json(&infile)?;
    for record in records.iter().take(10) {
        debug!("{:?}", record);
    }
    write_csv(&records, &outfile)?;
    info!(
        "Converted JSON file ({}) to CSV ({})",
        infile.as_ref().display(),
        outfile.as_ref().display()
    );
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RawEvent;
    use pretty_assertions::assert_eq;

    fn record(title: &str) -> DateRecord {
        DateRecord {
            year: 2017,
            title: title.to_string(),
            date_granted: "2017-01-13".to_string(),
            date_argued: "2017-10-02".to_string(),
            date_decided: MISSING_DATE.to_string(),
        }
    }

    #[test]
    fn test_csv_line_format() {
        let csv = to_csv_string(&[record("Jennings v. Rodriguez")]);
        assert_eq!(
            csv,
            "Year, Title, Date_Granted, Date_Argued, Date_Decided\n\
             2017, \"Jennings v. Rodriguez\", 2017-01-13, 2017-10-02, 0\n"
        );
    }

    #[test]
    fn test_parse_quoted_commas_and_quotes() {
        let rows = vec![
            record("Microsoft Corp. v. Baker, et al."),
            record("The \"Antelope\""),
            record(""),
        ];
        let parsed = parse_csv_str(&to_csv_string(&rows)).unwrap();
        assert_eq!(parsed, rows);
    }

    #[test]
    fn test_parse_title_with_line_breaks() {
        let rows = vec![
            record("A v.\nB"),
            record("Ex parte \"Quirin\",\r\nand others"),
            record("Next v. Row"),
        ];
        let parsed = parse_csv_str(&to_csv_string(&rows)).unwrap();
        assert_eq!(parsed, rows);

        let unterminated = format!("{}\n2017, \"A v.\nB, 0, 0, 0\n", CSV_HEADER);
        assert!(matches!(
            parse_csv_str(&unterminated),
            Err(OutputError::MalformedCsv { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_reports_line_after_multiline_title() {
        let csv = format!(
            "{}\n2017, \"A v.\nB\", 0, 0, 0\n2018, \"C\", 0\n",
            CSV_HEADER
        );
        assert!(matches!(
            parse_csv_str(&csv),
            Err(OutputError::MalformedCsv { line: 4, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_bad_header_and_rows() {
        assert!(parse_csv_str("Year,Name\n").is_err());
        assert!(parse_csv_str("").is_err());

        let short = format!("{}\n2017, \"A\", 0\n", CSV_HEADER);
        assert!(matches!(
            parse_csv_str(&short),
            Err(OutputError::MalformedCsv { line: 2, .. })
        ));

        let bad_year = format!("{}\nabc, \"A\", 0, 0, 0\n", CSV_HEADER);
        assert!(parse_csv_str(&bad_year).is_err());
    }

    #[test]
    fn test_from_raw_case() {
        let raw = RawCase {
            name: "A v. B".to_string(),
            timeline: vec![
                Some(RawEvent::new("Granted", vec![1_484_265_600])),
                None,
                Some(RawEvent::new("Argued", vec![1_506_902_400, 1_507_000_000])),
                Some(RawEvent::new("Reargued", vec![1_508_000_000])),
                Some(RawEvent::new("Decided", vec![])),
            ],
            ..Default::default()
        };

        let row = DateRecord::from_raw_case(2017, &raw, &TimelineExpander::new(0));
        assert_eq!(row.date_granted, "2017-01-13");
        assert_eq!(row.date_argued, "2017-10-02");
        assert_eq!(row.date_decided, MISSING_DATE);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("dates.csv");
        let json_path = dir.path().join("dates.json");
        let back_path = dir.path().join("dates_converted.csv");

        let rows = vec![record("Carpenter v. United States"), record("Epic Systems, Corp. v. Lewis")];
        write_csv(&rows, &csv_path).unwrap();

        assert_eq!(csv_to_json(&csv_path, &json_path).unwrap(), 2);
        assert_eq!(json_to_csv(&json_path, &back_path).unwrap(), 2);

        assert_eq!(read_csv(&back_path).unwrap(), rows);
        assert_eq!(
            std::fs::read_to_string(&csv_path).unwrap(),
            std::fs::read_to_string(&back_path).unwrap()
        );
    }

    #[test]
    fn test_json_keys() {
        let json = serde_json::to_value(record("X")).unwrap();
        assert_eq!(json["Year"], 2017);
        assert_eq!(json["Title"], "X");
        assert_eq!(json["Date_Decided"], "0");
    }
}
