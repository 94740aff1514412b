//! Extract-dates command implementation.
//!
//! Fetches one batch of cases per term year and writes the
//! `(year, title, granted, argued, decided)` table as CSV, converts it to
//! JSON and converts the JSON back to CSV.

use crate::api::{CaseSource, OyezClient};
use crate::output::{csv_to_json, json_to_csv, write_csv, DateRecord};
use crate::timeline::TimelineExpander;
use crate::utils::config::{
    DEFAULT_API_BASE_URL, DEFAULT_EXTRACT_END_YEAR, DEFAULT_EXTRACT_START_YEAR,
    DEFAULT_TZ_OFFSET_SECS, MAX_TZ_OFFSET_SECS,
};
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the extract-dates command
#[derive(Debug, Clone)]
pub struct ExtractArgs {
    pub api_url: String,

    /// First term year, inclusive
    pub start_year: i32,

    /// Last term year, inclusive
    pub end_year: i32,

    pub output_csv: PathBuf,

    pub output_json: PathBuf,

    /// CSV converted back from the JSON file
    pub roundtrip_csv: PathBuf,

    pub tz_offset_secs: i64,
}

impl Default for ExtractArgs {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_BASE_URL.to_string(),
            start_year: DEFAULT_EXTRACT_START_YEAR,
            end_year: DEFAULT_EXTRACT_END_YEAR,
            output_csv: PathBuf::from("dates.csv"),
            output_json: PathBuf::from("dates.json"),
            roundtrip_csv: PathBuf::from("dates_converted.csv"),
            tz_offset_secs: DEFAULT_TZ_OFFSET_SECS,
        }
    }
}

/// Execute the extract-dates command against the Oyez API
pub fn execute_extract(args: ExtractArgs) -> Result<Vec<DateRecord>> {
    let client = OyezClient::new(&args.api_url).context("Failed to create API client")?;
    extract_with_source(&args, &client)
}

/// Execute the extract-dates command with any case source
pub fn extract_with_source(args: &ExtractArgs, source: &dyn CaseSource) -> Result<Vec<DateRecord>> {
    let start_time = Instant::now();
    let expander = TimelineExpander::new(args.tz_offset_secs);

    info!("Step 1/3: Collecting dates for {}-{}...", args.start_year, args.end_year);
    let records = collect_dates(source, args.start_year, args.end_year, &expander)?;
    info!("Collected {} rows", records.len());

    info!("Step 2/3: Writing CSV...");
    write_csv(&records, &args.output_csv).context("Failed to write dates CSV")?;

    info!("Step 3/3: Converting CSV to JSON and back...");
    csv_to_json(&args.output_csv, &args.output_json).context("Failed to convert CSV to JSON")?;
    json_to_csv(&args.output_json, &args.roundtrip_csv).context("Failed to convert JSON to CSV")?;

    info!("Extract completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(records)
}

/// One row per case, years in ascending order
pub fn collect_dates(
    source: &dyn CaseSource,
    start_year: i32,
    end_year: i32,
    expander: &TimelineExpander,
) -> Result<Vec<DateRecord>> {
    let mut records = Vec::new();
    for year in start_year..=end_year {
        let cases = source
            .fetch_term(&year.to_string())
            .with_context(|| format!("Failed to fetch cases for {}", year))?;
        records.extend(
            cases
                .iter()
                .map(|case| DateRecord::from_raw_case(year, case, expander)),
        );
    }
    Ok(records)
}

/// Validate extract-dates arguments
pub fn validate_extract_args(args: &ExtractArgs) -> Result<()> {
    if !args.api_url.starts_with("http://") && !args.api_url.starts_with("https://") {
        anyhow::bail!("API URL must start with http:// or https://");
    }

    if args.start_year > args.end_year {
        anyhow::bail!(
            "start year {} is after end year {}",
            args.start_year,
            args.end_year
        );
    }

    if args.tz_offset_secs.abs() > MAX_TZ_OFFSET_SECS {
        anyhow::bail!("timezone offset must be within one day");
    }

    if args.output_csv == args.roundtrip_csv {
        anyhow::bail!("round-trip CSV must not overwrite the original CSV");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_extract_args() {
        assert!(validate_extract_args(&ExtractArgs::default()).is_ok());

        let args = ExtractArgs {
            start_year: 2025,
            ..Default::default()
        };
        assert!(validate_extract_args(&args).is_err());

        let args = ExtractArgs {
            roundtrip_csv: PathBuf::from("dates.csv"),
            ..Default::default()
        };
        assert!(validate_extract_args(&args).is_err());

        let args = ExtractArgs {
            tz_offset_secs: -90_000,
            ..Default::default()
        };
        assert!(validate_extract_args(&args).is_err());

        let args = ExtractArgs {
            tz_offset_secs: -18_000,
            ..Default::default()
        };
        assert!(validate_extract_args(&args).is_ok());
    }
}
