//! Console report of era statistics.

use crate::aggregator::{percentages, DurationStats, Era};
use crate::charts::bars::{MONTH_CHART_TITLE, WEEKDAY_CHART_TITLE};
use crate::charts::boxplot::DELIB_CHART_TITLE;
use std::fmt::Write;

/// Render the full statistics report
pub fn format_report(eras: &[Era]) -> String {
    let mut out = String::new();
    out.push_str("==== DATA STATISTICS ===\n");

    for era in eras {
        let freq: Vec<(String, u64)> = era
            .day_frequencies()
            .map(|(day, count)| (day.to_string(), count))
            .collect();
        write_frequency_block(&mut out, WEEKDAY_CHART_TITLE, era, &freq);
    }

    for era in eras {
        let freq: Vec<(String, u64)> = era.month_frequencies().collect();
        write_frequency_block(&mut out, MONTH_CHART_TITLE, era, &freq);
    }

    let _ = writeln!(out, "\n{}\n--------------", DELIB_CHART_TITLE);
    for era in eras {
        let _ = writeln!(out, "{}", era.name);
        match DurationStats::from_samples(&era.delib_duration) {
            Some(stats) => {
                let _ = writeln!(out, "{}", stats.summary());
            }
            None => {
                let _ = writeln!(out, "N: 0");
            }
        }
    }
    out.push_str("=================\n");
    out
}

/// Case and event totals, one line per era
pub fn format_totals(eras: &[Era]) -> String {
    let mut out = String::new();
    for era in eras {
        let _ = writeln!(
            out,
            "{:<45} cases: {:>5}  events: {:>6}  deliberation samples: {:>5}",
            era.title(),
            era.total_cases,
            era.total_events,
            era.delib_duration.len()
        );
    }
    out
}

fn write_frequency_block(out: &mut String, title: &str, era: &Era, freq: &[(String, u64)]) {
    let _ = writeln!(out, "\n{}\n{}", title, era.name);
    out.push_str("--------------\nTOTAL NUMBERS\n");
    for (key, value) in freq {
        let _ = writeln!(out, "{}: {}", key, value);
    }

    out.push_str("PERCENT\n");
    let counts: Vec<u64> = freq.iter().map(|(_, count)| *count).collect();
    for ((key, _), percent) in freq.iter().zip(percentages(&counts)) {
        let _ = writeln!(out, "{}: {:.1}", key, percent);
    }
}
