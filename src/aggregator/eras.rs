//! Historical era buckets and the fold of normalized cases into them.
//!
//! Each era accumulates case and event totals, weekday and month frequency
//! counts, and the deliberation-duration samples of its cases.

use crate::timeline::NormalizedCase;
use crate::utils::config::WEEKDAY_NAMES;
use log::debug;

/// A named, closed range of citation years with its accumulators
#[derive(Debug, Clone, PartialEq)]
pub struct Era {
    pub name: String,
    pub start: i32,
    pub end: i32,
    pub total_cases: u64,
    pub total_events: u64,
    pub delib_duration: Vec<i64>,
    /// Indexed Sunday-first, see `WEEKDAY_NAMES`
    pub day_counts: [u64; 7],
    /// Index 0 is January
    pub month_counts: [u64; 12],
}

impl Era {
    pub fn new(name: impl Into<String>, start: i32, end: i32) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            total_cases: 0,
            total_events: 0,
            delib_duration: Vec::new(),
            day_counts: [0; 7],
            month_counts: [0; 12],
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }

    /// "Early Republic (1783 to 1860)"
    pub fn title(&self) -> String {
        format!("{} ({} to {})", self.name, self.start, self.end)
    }

    pub fn day_count(&self, weekday: &str) -> Option<u64> {
        weekday_index(weekday).map(|i| self.day_counts[i])
    }

    /// Count for month `1..=12`
    pub fn month_count(&self, month: u32) -> Option<u64> {
        month_index(month).map(|i| self.month_counts[i])
    }

    /// `(weekday name, count)` in Sunday-first order
    pub fn day_frequencies(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        WEEKDAY_NAMES.iter().copied().zip(self.day_counts.iter().copied())
    }

    /// `("1".."12", count)` in calendar order
    pub fn month_frequencies(&self) -> impl Iterator<Item = (String, u64)> + '_ {
        self.month_counts
            .iter()
            .enumerate()
            .map(|(i, &count)| ((i + 1).to_string(), count))
    }

    fn add_case(&mut self, case: &NormalizedCase) {
        self.total_cases += 1;
        self.total_events += case.timeline.len() as u64;

        match case.delib_duration {
            Some(days) => self.delib_duration.push(days),
            None => debug!(
                "Case {} has no deliberation duration, sample not recorded",
                case.case_id
            ),
        }

        for event in &case.timeline {
            if let Some(i) = weekday_index(&event.weekday) {
                self.day_counts[i] += 1;
            }
            if let Some(i) = event.month_number().and_then(month_index) {
                self.month_counts[i] += 1;
            }
        }
    }
}

/// The three eras compared by the report
pub fn default_eras() -> Vec<Era> {
    vec![
        Era::new("Early Republic", 1783, 1860),
        Era::new("Civil War", 1861, 1865),
        Era::new("Reconstruction/Industrialization", 1866, 1889),
    ]
}

/// Index of the first era, in table order, whose range holds `year`
pub fn era_index(eras: &[Era], year: i32) -> Option<usize> {
    eras.iter().position(|era| era.contains(year))
}

/// Fold one case into its era
///
/// **Public** - main entry point for aggregation
///
/// # Returns
/// Index of the era the case landed in, or `None` when the case has no
/// citation year or the year is outside every era
pub fn fold(eras: &mut [Era], case: &NormalizedCase) -> Option<usize> {
    let Some(year) = case.citation_year() else {
        debug!("Case {} has no citation year, excluded from eras", case.case_id);
        return None;
    };

    let Some(index) = era_index(eras, year) else {
        debug!("Case {} cited {} falls outside every era", case.case_id, year);
        return None;
    };

    eras[index].add_case(case);
    Some(index)
}

/// Fold a batch of cases, returning how many were bucketed
pub fn fold_all<'a>(eras: &mut [Era], cases: impl IntoIterator<Item = &'a NormalizedCase>) -> usize {
    cases
        .into_iter()
        .filter(|case| fold(eras, case).is_some())
        .count()
}

fn weekday_index(weekday: &str) -> Option<usize> {
    WEEKDAY_NAMES.iter().position(|&name| name == weekday)
}

fn month_index(month: u32) -> Option<usize> {
    (1..=12).contains(&month).then(|| month as usize - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Citation;
    use crate::timeline::{EventKind, NormalizedEvent};
    use pretty_assertions::assert_eq;

    fn event(weekday: &str, month: &str) -> NormalizedEvent {
        NormalizedEvent {
            case_id: 1,
            event_type: EventKind::Argued,
            year: "1850".to_string(),
            month: month.to_string(),
            day: "01".to_string(),
            weekday: weekday.to_string(),
        }
    }

    fn case(year: &str, delib: Option<i64>, timeline: Vec<NormalizedEvent>) -> NormalizedCase {
        NormalizedCase {
            case_id: 1,
            name: "A v. B".to_string(),
            case_href: "h".to_string(),
            view_count: None,
            docket_number: String::new(),
            question: String::new(),
            term: "1789-1850".to_string(),
            description: String::new(),
            justia_url: String::new(),
            citation: Citation {
                year: year.to_string(),
                ..Default::default()
            },
            argued_duration: 1,
            case_duration: delib,
            delib_duration: delib,
            timeline,
        }
    }

    #[test]
    fn test_era_boundaries() {
        let eras = default_eras();
        assert_eq!(era_index(&eras, 1782), None);
        assert_eq!(era_index(&eras, 1783), Some(0));
        assert_eq!(era_index(&eras, 1860), Some(0));
        assert_eq!(era_index(&eras, 1861), Some(1));
        assert_eq!(era_index(&eras, 1865), Some(1));
        assert_eq!(era_index(&eras, 1866), Some(2));
        assert_eq!(era_index(&eras, 1889), Some(2));
        assert_eq!(era_index(&eras, 1890), None);
    }

    #[test]
    fn test_bucketing_is_total_and_disjoint() {
        let eras = default_eras();
        for year in 1783..=1889 {
            let hits = eras.iter().filter(|era| era.contains(year)).count();
            assert_eq!(hits, 1, "year {year}");
        }
    }

    #[test]
    fn test_fold_accumulates() {
        let mut eras = default_eras();
        let c = case(
            "1862",
            Some(14),
            vec![event("Monday", "03"), event("Monday", "12"), event("Friday", "03")],
        );

        assert_eq!(fold(&mut eras, &c), Some(1));
        let war = &eras[1];
        assert_eq!(war.total_cases, 1);
        assert_eq!(war.total_events, 3);
        assert_eq!(war.delib_duration, vec![14]);
        assert_eq!(war.day_count("Monday"), Some(2));
        assert_eq!(war.day_count("Friday"), Some(1));
        assert_eq!(war.day_count("Sunday"), Some(0));
        assert_eq!(war.month_count(3), Some(2));
        assert_eq!(war.month_count(12), Some(1));
        assert_eq!(eras[0].total_cases, 0);
    }

    #[test]
    fn test_fold_excludes_out_of_range_and_missing_year() {
        let mut eras = default_eras();
        assert_eq!(fold(&mut eras, &case("1900", Some(3), vec![])), None);
        assert_eq!(fold(&mut eras, &case("", Some(3), vec![])), None);
        assert!(eras.iter().all(|era| era.total_cases == 0));
    }

    #[test]
    fn test_fold_without_delib_duration() {
        let mut eras = default_eras();
        fold(&mut eras, &case("1800", None, vec![event("Tuesday", "02")]));
        assert_eq!(eras[0].total_cases, 1);
        assert!(eras[0].delib_duration.is_empty());
        assert_eq!(eras[0].day_count("Tuesday"), Some(1));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let mut eras = default_eras();
        fold(&mut eras, &case("1800", Some(1), vec![event("Someday", "13")]));
        assert_eq!(eras[0].total_events, 1);
        assert_eq!(eras[0].day_counts.iter().sum::<u64>(), 0);
        assert_eq!(eras[0].month_counts.iter().sum::<u64>(), 0);
    }

    #[test]
    fn test_frequencies_order() {
        let era = Era::new("x", 1, 2);
        let days: Vec<_> = era.day_frequencies().map(|(d, _)| d).collect();
        assert_eq!(days.first(), Some(&"Sunday"));
        assert_eq!(days.last(), Some(&"Saturday"));
        let months: Vec<_> = era.month_frequencies().map(|(m, _)| m).collect();
        assert_eq!(months[0], "1");
        assert_eq!(months[11], "12");
        assert_eq!(era.title(), "x (1 to 2)");
    }

    #[test]
    fn test_fold_all() {
        let mut eras = default_eras();
        let cases = vec![case("1790", Some(1), vec![]), case("1950", Some(1), vec![])];
        assert_eq!(fold_all(&mut eras, &cases), 1);
    }
}
