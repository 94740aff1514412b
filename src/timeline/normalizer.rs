//! Case normalization: raw API case to storage-ready record.
//!
//! Expands every timeline date into calendar fields and derives the three
//! duration metrics from the Argued / Reargued / Decided dates.

use super::expander::{calendar_day_field, TimelineExpander};
use super::schema::{EventKind, NormalizedCase, NormalizedEvent};
use crate::api::RawCase;
use crate::utils::config::{DEFAULT_TZ_OFFSET_SECS, SECONDS_PER_DAY};
use crate::utils::error::TimelineError;
use log::{debug, warn};

/// How a span between two timestamps becomes a day count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationMode {
    /// Whole elapsed days; undefined spans are `None`
    #[default]
    Elapsed,
    /// Day-of-month of the span read as a date, with 0 for missing dates.
    /// Wraps past one month; only for parity with historical output.
    CalendarDayField,
}

/// Normalization settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub tz_offset_secs: i64,
    pub duration_mode: DurationMode,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            tz_offset_secs: DEFAULT_TZ_OFFSET_SECS,
            duration_mode: DurationMode::Elapsed,
        }
    }
}

/// Key dates gathered while walking a timeline
#[derive(Debug, Default)]
struct DurationTracker {
    date_decided: Option<i64>,
    min_date_argued: Option<i64>,
    max_date_argued: Option<i64>,
    date_reargued: Option<i64>,
    total_argued: u32,
    total_reargued: u32,
}

impl DurationTracker {
    fn record(&mut self, kind: &EventKind, dates: &[i64]) {
        match kind {
            EventKind::Decided => {
                if let Some(&first) = dates.first() {
                    self.date_decided = Some(first);
                }
            }
            EventKind::Argued => {
                if let (Some(&first), Some(&last)) = (dates.first(), dates.last()) {
                    self.min_date_argued = Some(first);
                    self.max_date_argued = Some(last);
                    self.total_argued = dates.len() as u32;
                }
            }
            EventKind::Reargued => {
                if let Some(&first) = dates.first() {
                    self.date_reargued = Some(first);
                    self.total_reargued = dates.len() as u32;
                }
            }
            EventKind::Other(_) => {}
        }
    }

    fn argued_duration(&self) -> u32 {
        self.total_argued + self.total_reargued
    }

    /// Reargument counts only when it is later than the last argument
    ///
    /// The day-field mode keeps the historical rule: a missing argument reads
    /// as timestamp 0, and a reargument at or before it is ignored.
    fn latest_argument(&self, mode: DurationMode) -> Option<i64> {
        match mode {
            DurationMode::Elapsed => match (self.date_reargued, self.max_date_argued) {
                (Some(rearg), Some(max)) if rearg > max => Some(rearg),
                (Some(rearg), None) => Some(rearg),
                (_, max) => max,
            },
            DurationMode::CalendarDayField => {
                let max = self.max_date_argued.unwrap_or(0);
                match self.date_reargued {
                    Some(rearg) if rearg != 0 && rearg > max => Some(rearg),
                    _ => self.max_date_argued,
                }
            }
        }
    }
}

/// Normalize one raw case
///
/// **Public** - main entry point for the core transformation
///
/// # Errors
/// * `TimelineError::MalformedCase` - the case has no `ID` or no `href`
///
/// Timestamps that cannot be expanded are logged and left out of the
/// timeline; they never fail the case.
pub fn normalize(raw: &RawCase, options: &NormalizeOptions) -> Result<NormalizedCase, TimelineError> {
    let case_id = raw.id.ok_or_else(|| TimelineError::MalformedCase {
        name: raw.name.clone(),
        missing: "ID",
    })?;
    let case_href = raw.href.clone().ok_or_else(|| TimelineError::MalformedCase {
        name: raw.name.clone(),
        missing: "href",
    })?;

    let expander = TimelineExpander::new(options.tz_offset_secs);
    let mut tracker = DurationTracker::default();
    let mut timeline = Vec::new();

    for raw_event in raw.timeline.iter().flatten() {
        let kind = EventKind::from_label(&raw_event.event);
        let mut valid_dates = Vec::with_capacity(raw_event.dates.len());

        for &timestamp in &raw_event.dates {
            match expander.expand(timestamp) {
                Ok(date) => {
                    valid_dates.push(timestamp);
                    timeline.push(NormalizedEvent::new(case_id, kind.clone(), date));
                }
                Err(e) => warn!(
                    "Skipping {} date of case {} ({}): {}",
                    kind, case_id, raw.name, e
                ),
            }
        }

        // durations only see dates that made it into the timeline
        tracker.record(&kind, &valid_dates);
    }

    let decided = tracker.date_decided;
    let case_duration = span_days(tracker.min_date_argued, decided, options.duration_mode);
    let delib_duration = span_days(tracker.latest_argument(options.duration_mode), decided, options.duration_mode);

    if decided.is_none() {
        debug!("Case {} has no decision date, durations left empty", case_id);
    }

    Ok(NormalizedCase {
        case_id,
        name: raw.name.clone(),
        case_href,
        view_count: raw.view_count,
        docket_number: raw.docket_number.clone(),
        question: raw.question.clone(),
        term: raw.term.clone(),
        description: raw.description.clone(),
        justia_url: raw.justia_url.clone(),
        citation: raw.citation.clone().unwrap_or_default(),
        argued_duration: tracker.argued_duration(),
        case_duration,
        delib_duration,
        timeline,
    })
}

/// Normalize a batch, logging and dropping malformed cases
pub fn normalize_all(raw_cases: &[RawCase], options: &NormalizeOptions) -> Vec<NormalizedCase> {
    raw_cases
        .iter()
        .filter_map(|raw| match normalize(raw, options) {
            Ok(case) => Some(case),
            Err(e) => {
                warn!("Skipping case (term {}): {}", raw.term, e);
                None
            }
        })
        .collect()
}

fn span_days(from: Option<i64>, to: Option<i64>, mode: DurationMode) -> Option<i64> {
    match mode {
        DurationMode::Elapsed => {
            let (from, to) = (from?, to?);
            Some(to.checked_sub(from)?.div_euclid(SECONDS_PER_DAY))
        }
        DurationMode::CalendarDayField => {
            let delta = to.unwrap_or(0).checked_sub(from.unwrap_or(0))?;
            match calendar_day_field(delta) {
                Ok(day) => Some(day),
                Err(e) => {
                    warn!("Cannot derive day field for span of {}s: {}", delta, e);
                    None
                }
            }
        }
    }
}
