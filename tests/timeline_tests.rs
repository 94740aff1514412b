use scotus_norms::api::{parse_case_array, RawEvent};
use scotus_norms::timeline::{expand, normalize, normalize_all, EventKind, NormalizeOptions};
use serde_json::json;

#[test]
fn test_expand_is_deterministic() {
    for ts in [-5_266_468_800_i64, -1, 0, 86_399, 1_506_902_400] {
        assert_eq!(expand(ts, 18_000).unwrap(), expand(ts, 18_000).unwrap());
    }
    let date = expand(-5_265_345_600, 18_000).unwrap();
    assert_eq!(date.iso_date(), "1803-02-24");
    assert_eq!(date.weekday, "Thursday");
}

#[test]
fn test_normalize_api_payload() {
    let payload = json!([
        {
            "ID": 50,
            "name": "Argued Twice v. Decided",
            "href": "https://api.oyez.org/cases/1850-1900/50",
            "view_count": 12,
            "docket_number": "7",
            "term": "1855",
            "citation": {"volume": 59, "page": "1", "year": 1855, "href": null},
            "timeline": [
                {"event": "Argued", "dates": [1000000], "href": null},
                null,
                {"event": "Decided", "dates": [1090000], "href": null}
            ]
        },
        {
            "ID": 51,
            "name": "Unusual Events",
            "href": "https://api.oyez.org/cases/1850-1900/51",
            "timeline": [
                {"event": "Argued", "dates": [0, 86400, 172800]},
                {"event": "Reargued", "dates": [864000]},
                {"event": "Granted", "dates": [-86400]},
                {"event": "Decided", "dates": null}
            ]
        },
        {"ID": 52, "name": "No Href"}
    ]);

    let raw = parse_case_array("1850-1900", payload).unwrap();
    assert_eq!(raw.len(), 3);

    let cases = normalize_all(&raw, &NormalizeOptions::default());
    assert_eq!(cases.len(), 2);

    let first = &cases[0];
    assert_eq!(first.argued_duration, 1);
    assert_eq!(first.case_duration, Some(1));
    assert_eq!(first.delib_duration, Some(1));
    assert_eq!(first.timeline.len(), 2);
    assert_eq!(first.citation.volume, "59");
    assert_eq!(first.citation_year(), Some(1855));

    let second = &cases[1];
    assert_eq!(second.argued_duration, 4);
    assert_eq!(second.timeline.len(), 5);
    assert_eq!(second.case_duration, None);
    assert_eq!(second.delib_duration, None);
    assert_eq!(
        second.timeline[4].event_type,
        EventKind::Other("Granted".to_string())
    );
}

#[test]
fn test_event_count_matches_dates() {
    let raw = scotus_norms::api::RawCase {
        id: Some(9),
        href: Some("h".to_string()),
        timeline: vec![
            Some(RawEvent::new("Argued", vec![1, 2])),
            None,
            Some(RawEvent::new("Opinion announced", vec![3])),
            Some(RawEvent::new("Decided", vec![])),
            None,
        ],
        ..Default::default()
    };

    let expected: usize = raw.timeline.iter().flatten().map(|e| e.dates.len()).sum();
    let case = normalize(&raw, &NormalizeOptions::default()).unwrap();
    assert_eq!(case.timeline.len(), expected);
    assert!(case.timeline.iter().all(|event| event.case_id == 9));
}
