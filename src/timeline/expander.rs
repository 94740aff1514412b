//! UNIX timestamp to calendar field expansion.
//!
//! There is one conversion for the whole crate. The timezone is approximated
//! by a fixed offset added to the timestamp before reading the UTC calendar,
//! so no timezone database is involved.

use super::schema::CalendarDate;
use crate::utils::error::TimelineError;
use chrono::{DateTime, Datelike, Utc};

/// Expands timestamps with a fixed offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineExpander {
    offset_secs: i64,
}

impl TimelineExpander {
    pub fn new(offset_secs: i64) -> Self {
        Self { offset_secs }
    }

    pub fn offset_secs(&self) -> i64 {
        self.offset_secs
    }

    pub fn expand(&self, timestamp: i64) -> Result<CalendarDate, TimelineError> {
        expand(timestamp, self.offset_secs)
    }
}

/// Calendar fields of the instant `timestamp + offset_secs`
///
/// Years outside 0..=9999 are rejected so `year` always has four digits.
pub fn expand(timestamp: i64, offset_secs: i64) -> Result<CalendarDate, TimelineError> {
    let dt = shifted(timestamp, offset_secs)?;

    Ok(CalendarDate {
        year: dt.format("%Y").to_string(),
        month: dt.format("%m").to_string(),
        day: dt.format("%d").to_string(),
        weekday: dt.format("%A").to_string(),
    })
}

/// Day-of-month of `delta_secs` read as a date after the epoch
///
/// This is how elapsed days were historically derived: it wraps every month
/// and is kept only for comparison runs.
pub fn calendar_day_field(delta_secs: i64) -> Result<i64, TimelineError> {
    Ok(i64::from(shifted(delta_secs, 0)?.day()))
}

fn shifted(timestamp: i64, offset_secs: i64) -> Result<DateTime<Utc>, TimelineError> {
    let invalid = || TimelineError::InvalidTimestamp {
        timestamp,
        offset: offset_secs,
    };

    let dt = timestamp
        .checked_add(offset_secs)
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .ok_or_else(invalid)?;

    if !(0..=9999).contains(&dt.year()) {
        return Err(invalid());
    }

    Ok(dt)
}
