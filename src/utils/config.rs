//! Configuration and constants for the CLI.

use std::time::Duration;

/// Oyez endpoint; the term (or year) filter value is appended
pub const DEFAULT_API_BASE_URL: &str = "https://api.oyez.org/cases?per_page=0&filter=term:";

/// Default timeout for API requests
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Current normalized-case JSON schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Early terms are batched into 50-year groups by the API filter
pub const DEFAULT_TERMS: &[&str] = &["1789-1850", "1850-1900"];

// Range of term years for the date-extraction path
pub const DEFAULT_EXTRACT_START_YEAR: i32 = 2017;
pub const DEFAULT_EXTRACT_END_YEAR: i32 = 2024;

/// Offset added to every timestamp before calendar conversion (UTC -> EST is +5h here)
pub const DEFAULT_TZ_OFFSET_SECS: i64 = 18_000;

pub const SECONDS_PER_DAY: i64 = 86_400;

// A day either way covers every real timezone
pub const MAX_TZ_OFFSET_SECS: i64 = SECONDS_PER_DAY;

/// Weekday names in Sunday-first order, matching `%A`
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// Placeholder written for events a case never reached
pub const MISSING_DATE: &str = "0";
