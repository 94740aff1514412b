//! Normalized case and event records.
//!
//! These are the shapes handed to persistence and aggregation, and the shape
//! written to the normalized-cases JSON file.

use crate::api::Citation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Procedural event label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    Argued,
    Decided,
    Reargued,
    /// Any label without duration semantics ("Granted", "Dismissed", ...)
    Other(String),
}

impl EventKind {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Argued" => EventKind::Argued,
            "Decided" => EventKind::Decided,
            "Reargued" => EventKind::Reargued,
            other => EventKind::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            EventKind::Argued => "Argued",
            EventKind::Decided => "Decided",
            EventKind::Reargued => "Reargued",
            EventKind::Other(label) => label,
        }
    }

    /// Row id in the `event_types` lookup table
    pub fn type_id(&self) -> i64 {
        match self {
            EventKind::Argued => 1,
            EventKind::Decided => 2,
            EventKind::Reargued => 3,
            EventKind::Other(_) => 4,
        }
    }
}

impl From<String> for EventKind {
    fn from(label: String) -> Self {
        EventKind::from_label(&label)
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.label().to_string()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calendar fields of one instant, formatted the way `strftime` does
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDate {
    /// `%Y`
    pub year: String,
    /// `%m`
    pub month: String,
    /// `%d`
    pub day: String,
    /// `%A`
    pub weekday: String,
}

impl CalendarDate {
    /// `YYYY-MM-DD`
    pub fn iso_date(&self) -> String {
        format!("{}-{}-{}", self.year, self.month, self.day)
    }
}

/// One dated occurrence of an event in a case timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    pub case_id: i64,
    #[serde(rename = "event")]
    pub event_type: EventKind,
    pub year: String,
    pub month: String,
    pub day: String,
    pub weekday: String,
}

impl NormalizedEvent {
    pub fn new(case_id: i64, event_type: EventKind, date: CalendarDate) -> Self {
        Self {
            case_id,
            event_type,
            year: date.year,
            month: date.month,
            day: date.day,
            weekday: date.weekday,
        }
    }

    /// Month as 1..=12, if the stored field parses
    pub fn month_number(&self) -> Option<u32> {
        self.month.parse().ok().filter(|m| (1..=12).contains(m))
    }
}

/// A case ready for storage and aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCase {
    pub case_id: i64,
    pub name: String,
    pub case_href: String,
    pub view_count: Option<i64>,
    pub docket_number: String,
    pub question: String,
    pub term: String,
    pub description: String,
    pub justia_url: String,
    pub citation: Citation,

    /// Number of argument sessions, reargument included
    pub argued_duration: u32,

    /// Days from first argument to decision
    pub case_duration: Option<i64>,

    /// Days from last argument (or reargument) to decision
    pub delib_duration: Option<i64>,

    pub timeline: Vec<NormalizedEvent>,
}

impl NormalizedCase {
    pub fn citation_year(&self) -> Option<i32> {
        self.citation.year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_labels() {
        assert_eq!(EventKind::from_label("Argued"), EventKind::Argued);
        assert_eq!(EventKind::from_label("Reargued"), EventKind::Reargued);
        assert_eq!(
            EventKind::from_label("Granted"),
            EventKind::Other("Granted".to_string())
        );
        assert_eq!(EventKind::Other("Dismissed".to_string()).label(), "Dismissed");
    }

    #[test]
    fn test_event_kind_type_ids() {
        assert_eq!(EventKind::Argued.type_id(), 1);
        assert_eq!(EventKind::Decided.type_id(), 2);
        assert_eq!(EventKind::Reargued.type_id(), 3);
        assert_eq!(EventKind::Other("Granted".into()).type_id(), 4);
    }

    #[test]
    fn test_event_kind_serializes_as_label() {
        let json = serde_json::to_string(&EventKind::Decided).unwrap();
        assert_eq!(json, "\"Decided\"");
        let kind: EventKind = serde_json::from_str("\"Juris Postponed\"").unwrap();
        assert_eq!(kind, EventKind::Other("Juris Postponed".to_string()));
    }

    #[test]
    fn test_month_number() {
        let date = CalendarDate {
            year: "1850".into(),
            month: "03".into(),
            day: "07".into(),
            weekday: "Thursday".into(),
        };
        assert_eq!(date.iso_date(), "1850-03-07");
        let event = NormalizedEvent::new(1, EventKind::Argued, date);
        assert_eq!(event.month_number(), Some(3));
    }
}
