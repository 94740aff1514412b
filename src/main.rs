//! SCOTUS Norms CLI
//!
//! Normalizes Supreme Court case timelines from the Oyez API and reports
//! when the early Court held its public proceedings.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use scotus_norms::commands::{
    execute_collect, execute_extract, resolve_terms, validate_args, validate_extract_args,
    CollectArgs, ExtractArgs,
};
use scotus_norms::timeline::DurationMode;
use scotus_norms::utils::config::{DEFAULT_API_BASE_URL, SCHEMA_VERSION};

/// SCOTUS Norms - work norms of the early U.S. Supreme Court
#[derive(Parser, Debug)]
#[command(name = "scotus-norms")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Seconds added to every timestamp before calendar conversion
    #[arg(long, global = true, env = "SCOTUS_TZ_OFFSET", default_value = "18000", allow_hyphen_values = true)]
    tz_offset: i64,

    /// Oyez cases endpoint; the term filter value is appended
    #[arg(long, global = true, env = "SCOTUS_API_URL", default_value = DEFAULT_API_BASE_URL)]
    api_url: String,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch, normalize, store and report on case timelines
    Collect {
        /// Term filter values to fetch [default: 1789-1850,1850-1900]
        #[arg(short, long, value_delimiter = ',')]
        terms: Vec<String>,

        /// Read raw cases from a JSON array instead of the API
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// SQLite database to recreate and fill
        #[arg(long)]
        db: Option<PathBuf>,

        /// Output path for normalized cases JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for the SVG charts
        #[arg(short, long)]
        charts_dir: Option<PathBuf>,

        /// Chart width in pixels
        #[arg(long, default_value = "900")]
        width: usize,

        /// Compute durations with the historical day-of-month formula
        #[arg(long)]
        legacy_durations: bool,

        /// Do not print the statistics report
        #[arg(long)]
        quiet: bool,
    },

    /// Extract granted/argued/decided dates for a range of term years
    ExtractDates {
        /// First term year
        #[arg(long, default_value = "2017")]
        start_year: i32,

        /// Last term year (inclusive)
        #[arg(long, default_value = "2024")]
        end_year: i32,

        /// Output CSV path
        #[arg(long, default_value = "dates.csv")]
        csv: PathBuf,

        /// Output JSON path
        #[arg(long, default_value = "dates.json")]
        json: PathBuf,

        /// CSV converted back from the JSON output
        #[arg(long, default_value = "dates_converted.csv")]
        roundtrip: PathBuf,
    },

    /// Convert a date CSV file to JSON
    CsvToJson {
        /// Input CSV path
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert a date JSON file to CSV
    JsonToCsv {
        /// Input JSON path
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Validate a normalized cases JSON file
    Validate {
        /// Path to normalized cases JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Collect {
            terms,
            input,
            db,
            output,
            charts_dir,
            width,
            legacy_durations,
            quiet,
        } => {
            let args = CollectArgs {
                api_url: cli.api_url,
                terms: resolve_terms(terms),
                input,
                database: db,
                output_json: output,
                charts_dir,
                chart_width: width,
                tz_offset_secs: cli.tz_offset,
                duration_mode: if legacy_durations {
                    DurationMode::CalendarDayField
                } else {
                    DurationMode::Elapsed
                },
                print_summary: !quiet,
            };

            // Validate args first
            validate_args(&args)?;

            let summary = execute_collect(args)?;
            if let Some(store) = summary.store {
                println!(
                    "Stored {} cases and {} events ({} failed)",
                    store.cases_written, store.events_written, store.cases_failed
                );
            }
            for chart in &summary.charts {
                println!("Chart written: {}", chart.display());
            }
        }

        Commands::ExtractDates {
            start_year,
            end_year,
            csv,
            json,
            roundtrip,
        } => {
            let args = ExtractArgs {
                api_url: cli.api_url,
                start_year,
                end_year,
                output_csv: csv,
                output_json: json,
                roundtrip_csv: roundtrip,
                tz_offset_secs: cli.tz_offset,
            };

            validate_extract_args(&args)?;

            let records = execute_extract(args)?;
            println!("Extracted {} cases", records.len());
        }

        Commands::CsvToJson { input, output } => {
            let rows = scotus_norms::output::csv_to_json(&input, &output)?;
            println!("Converted {} rows", rows);
        }

        Commands::JsonToCsv { input, output } => {
            let rows = scotus_norms::output::json_to_csv(&input, &output)?;
            println!("Converted {} rows", rows);
        }

        Commands::Validate { file } => {
            validate_cases_file(file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a normalized cases JSON file
///
/// **Private** - internal command implementation
fn validate_cases_file(file_path: PathBuf) -> Result<()> {
    use scotus_norms::output::read_cases;

    println!("Validating cases: {}", file_path.display());

    let document = read_cases(&file_path)?;

    println!("✓ Valid normalized cases JSON");
    println!("  Version: {}", document.version);
    println!("  Terms: {}", document.terms.join(", "));
    println!("  Timezone offset: {}s", document.tz_offset_secs);
    println!("  Cases: {}", document.cases.len());
    println!("  Events: {}", document.total_events());

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("SCOTUS Norms v{}", env!("CARGO_PKG_VERSION"));
    println!("Cases Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Work norms of the early U.S. Supreme Court from Oyez case timelines.");
}
