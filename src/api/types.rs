//! Raw case records as returned by the Oyez `cases` endpoint.
//!
//! The upstream shape is loose: citation numbers arrive as strings, numbers or
//! null, and timelines may contain null entries. Everything here deserializes
//! leniently and leaves validation to the normalizer.

use serde::{Deserialize, Deserializer, Serialize};

/// One case object from the API response array
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCase {
    #[serde(rename = "ID", default)]
    pub id: Option<i64>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(default)]
    pub href: Option<String>,

    #[serde(default)]
    pub view_count: Option<i64>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub docket_number: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub question: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub term: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub justia_url: String,

    #[serde(default)]
    pub citation: Option<Citation>,

    /// Null entries are legal and skipped downstream
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timeline: Vec<Option<RawEvent>>,
}

/// Reporter citation of a case
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    #[serde(default, deserialize_with = "lenient_string")]
    pub volume: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub page: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub year: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub href: String,
}

impl Citation {
    /// Citation year as a number, if one was reported
    pub fn year(&self) -> Option<i32> {
        self.year.trim().parse().ok()
    }
}

/// One procedural event in a raw timeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(default, deserialize_with = "lenient_string")]
    pub event: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub dates: Vec<i64>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub href: String,
}

impl RawEvent {
    pub fn new(event: impl Into<String>, dates: Vec<i64>) -> Self {
        Self {
            event: event.into(),
            dates,
            href: String::new(),
        }
    }
}

/// Accept a string, a number, a bool or null and keep it as text
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_case() {
        let raw = json!({
            "ID": 50606,
            "name": "Marbury v. Madison",
            "href": "https://api.oyez.org/cases/1789-1850/5us137",
            "view_count": 12,
            "docket_number": "",
            "citation": {"volume": "5", "page": "137", "year": "1803", "href": "x"},
            "timeline": [
                {"event": "Decided", "dates": [-5330448000i64], "href": "d"},
                null
            ]
        });

        let case: RawCase = serde_json::from_value(raw).unwrap();
        assert_eq!(case.id, Some(50606));
        assert_eq!(case.citation.as_ref().unwrap().year(), Some(1803));
        assert_eq!(case.timeline.len(), 2);
        assert!(case.timeline[1].is_none());
    }

    #[test]
    fn test_lenient_citation_fields() {
        let raw = json!({"volume": 5, "page": null, "year": 1860});
        let citation: Citation = serde_json::from_value(raw).unwrap();
        assert_eq!(citation.volume, "5");
        assert_eq!(citation.page, "");
        assert_eq!(citation.year(), Some(1860));
    }

    #[test]
    fn test_null_timeline_and_dates() {
        let raw = json!({"ID": 1, "href": "h", "timeline": null});
        let case: RawCase = serde_json::from_value(raw).unwrap();
        assert!(case.timeline.is_empty());

        let event: RawEvent = serde_json::from_value(json!({"event": "Argued", "dates": null})).unwrap();
        assert!(event.dates.is_empty());
    }
}
