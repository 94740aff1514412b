//! Collect command implementation.
//!
//! The collect command:
//! 1. Fetches raw cases per term (or reads them from a file)
//! 2. Normalizes every case timeline
//! 3. Persists cases and events (if a database is given)
//! 4. Writes normalized cases JSON (if requested)
//! 5. Folds cases into historical eras
//! 6. Prints statistics and renders charts

use super::report::{format_report, format_totals};
use crate::aggregator::{default_eras, fold_all, Era};
use crate::api::{CaseSource, OyezClient, RawCase};
use crate::charts::{render_delib_boxplot, render_month_chart, render_weekday_chart, ChartConfig};
use crate::db::{CaseStore, StoreReport};
use crate::output::{write_cases, write_svg, CaseDocument};
use crate::timeline::{normalize_all, DurationMode, NormalizeOptions};
use crate::utils::config::{
    DEFAULT_API_BASE_URL, DEFAULT_TERMS, DEFAULT_TZ_OFFSET_SECS, MAX_TZ_OFFSET_SECS,
};
use anyhow::{Context, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the collect command
#[derive(Debug, Clone)]
pub struct CollectArgs {
    /// API base URL, the term is appended
    pub api_url: String,

    /// Term filter values to fetch
    pub terms: Vec<String>,

    /// Raw case JSON array to read instead of calling the API
    pub input: Option<PathBuf>,

    /// SQLite database to (re)create and fill
    pub database: Option<PathBuf>,

    /// Output path for normalized cases JSON
    pub output_json: Option<PathBuf>,

    /// Directory for the three SVG charts
    pub charts_dir: Option<PathBuf>,

    pub chart_width: usize,

    pub tz_offset_secs: i64,

    pub duration_mode: DurationMode,

    /// Print the statistics report to stdout
    pub print_summary: bool,
}

impl Default for CollectArgs {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_BASE_URL.to_string(),
            terms: resolve_terms(Vec::new()),
            input: None,
            database: None,
            output_json: None,
            charts_dir: None,
            chart_width: ChartConfig::default().width,
            tz_offset_secs: DEFAULT_TZ_OFFSET_SECS,
            duration_mode: DurationMode::Elapsed,
            print_summary: true,
        }
    }
}

/// Terms given on the command line, or the default terms when none were
pub fn resolve_terms(terms: Vec<String>) -> Vec<String> {
    if terms.is_empty() {
        DEFAULT_TERMS.iter().map(|t| t.to_string()).collect()
    } else {
        terms
    }
}

/// What a collect run produced
#[derive(Debug, Clone)]
pub struct CollectSummary {
    pub raw_cases: usize,
    pub normalized_cases: usize,
    pub bucketed_cases: usize,
    pub store: Option<StoreReport>,
    pub charts: Vec<PathBuf>,
    pub eras: Vec<Era>,
}

/// Execute the collect command against the Oyez API or an input file
pub fn execute_collect(args: CollectArgs) -> Result<CollectSummary> {
    let client = OyezClient::new(&args.api_url).context("Failed to create API client")?;
    collect_with_source(&args, &client)
}

/// Execute the collect command with any case source
///
/// **Public** - lets tests and callers substitute the retrieval collaborator
pub fn collect_with_source(args: &CollectArgs, source: &dyn CaseSource) -> Result<CollectSummary> {
    let start_time = Instant::now();

    // Step 1: Retrieve raw cases
    info!("Step 1/6: Retrieving raw cases...");
    let raw_cases = match &args.input {
        Some(path) => read_raw_cases(path)?,
        None => fetch_terms(source, &args.terms)?,
    };
    info!("Data successfully imported ({} cases)", raw_cases.len());

    // Step 2: Normalize
    info!("Step 2/6: Normalizing case timelines...");
    let options = NormalizeOptions {
        tz_offset_secs: args.tz_offset_secs,
        duration_mode: args.duration_mode,
    };
    let cases = normalize_all(&raw_cases, &options);
    if cases.len() < raw_cases.len() {
        warn!("{} malformed cases skipped", raw_cases.len() - cases.len());
    }

    // Step 3: Persist
    let store = match &args.database {
        Some(path) => {
            info!("Step 3/6: Storing cases in {}...", path.display());
            let mut store = CaseStore::open(path)
                .with_context(|| format!("Failed to open database {}", path.display()))?;
            Some(store.save_all(&cases))
        }
        None => {
            info!("Step 3/6: Skipping database (not requested)");
            None
        }
    };

    // Step 4: Normalized JSON
    if let Some(path) = &args.output_json {
        info!("Step 4/6: Writing normalized cases...");
        let document = CaseDocument::new(args.terms.clone(), args.tz_offset_secs, cases.clone());
        write_cases(&document, path).context("Failed to write normalized cases JSON")?;
    } else {
        info!("Step 4/6: Skipping normalized JSON (not requested)");
    }

    // Step 5: Aggregate
    info!("Step 5/6: Aggregating by historical era...");
    let mut eras = default_eras();
    let bucketed_cases = fold_all(&mut eras, &cases);
    info!(
        "{} of {} cases fall inside the era table",
        bucketed_cases,
        cases.len()
    );

    // Step 6: Report
    info!("Step 6/6: Reporting...");
    if args.print_summary {
        println!("\n{}", format_totals(&eras));
        println!("{}", format_report(&eras));
    }

    let charts = match &args.charts_dir {
        Some(dir) => render_charts(&eras, dir, args.chart_width)?,
        None => Vec::new(),
    };

    info!("Collect completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(CollectSummary {
        raw_cases: raw_cases.len(),
        normalized_cases: cases.len(),
        bucketed_cases,
        store,
        charts,
        eras,
    })
}

/// Render and write the weekday, month and deliberation charts
pub fn render_charts(eras: &[Era], dir: &Path, width: usize) -> Result<Vec<PathBuf>> {
    let config = ChartConfig::new().with_width(width);
    let mut written = Vec::new();

    let weekday = render_weekday_chart(eras, Some(&config)).context("Failed to render weekday chart")?;
    let path = dir.join("weekdays.svg");
    write_svg(&weekday, &path).context("Failed to write weekday chart")?;
    written.push(path);

    let month = render_month_chart(eras, Some(&config)).context("Failed to render month chart")?;
    let path = dir.join("months.svg");
    write_svg(&month, &path).context("Failed to write month chart")?;
    written.push(path);

    match render_delib_boxplot(eras, Some(&config)) {
        Ok(boxplot) => {
            let path = dir.join("deliberation.svg");
            write_svg(&boxplot, &path).context("Failed to write deliberation chart")?;
            written.push(path);
        }
        Err(e) => warn!("Skipping deliberation chart: {}", e),
    }

    Ok(written)
}

/// Fetch every term in order
pub fn fetch_terms(source: &dyn CaseSource, terms: &[String]) -> Result<Vec<RawCase>> {
    let mut cases = Vec::new();
    for term in terms {
        let batch = source
            .fetch_term(term)
            .with_context(|| format!("Failed to fetch cases for term {}", term))?;
        cases.extend(batch);
    }
    Ok(cases)
}

fn read_raw_cases(path: &Path) -> Result<Vec<RawCase>> {
    info!("Reading raw cases from {}", path.display());
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let cases = serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("Failed to parse raw cases in {}", path.display()))?;
    Ok(cases)
}

/// Validate collect arguments
pub fn validate_args(args: &CollectArgs) -> Result<()> {
    if args.input.is_none() {
        if args.api_url.is_empty() {
            anyhow::bail!("API URL cannot be empty");
        }
        if !args.api_url.starts_with("http://") && !args.api_url.starts_with("https://") {
            anyhow::bail!("API URL must start with http:// or https://");
        }
        if args.terms.iter().all(|t| t.trim().is_empty()) {
            anyhow::bail!("At least one term is required");
        }
    }

    if args.chart_width < 200 {
        anyhow::bail!("chart width must be at least 200 pixels");
    }

    if args.tz_offset_secs.abs() > MAX_TZ_OFFSET_SECS {
        anyhow::bail!("timezone offset must be within one day");
    }

    Ok(())
}
