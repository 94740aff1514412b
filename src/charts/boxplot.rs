//! Horizontal box plot of deliberation durations by era.

use super::{escape_xml, svg_open, svg_title, ChartConfig, BAR_FILL};
use crate::aggregator::{DurationStats, Era};
use crate::utils::error::ChartError;
use log::info;

pub const DELIB_CHART_TITLE: &str = "Mean Number of Days to Reach Decision";

const ROW_HEIGHT: usize = 90;
const TOP_MARGIN: usize = 50;
const SIDE_MARGIN: usize = 40;
const AXIS_HEIGHT: usize = 50;
const BOX_HEIGHT: f64 = 30.0;

/// Whisker reach in multiples of the interquartile range
const WHISKER_IQR: f64 = 1.5;

/// One box per era, latest era on top
///
/// Whiskers reach the furthest sample within 1.5 IQR of the box; samples
/// beyond that are drawn as outlier dots. Eras without samples keep their
/// row and are labelled as empty.
pub fn render_delib_boxplot(eras: &[Era], config: Option<&ChartConfig>) -> Result<String, ChartError> {
    if eras.is_empty() {
        return Err(ChartError::NoEras);
    }

    let config = config.cloned().unwrap_or_default();
    let width = config.width;
    let title = config.title_or(DELIB_CHART_TITLE);

    let rows: Vec<(&Era, Option<DurationStats>)> = eras
        .iter()
        .rev()
        .map(|era| (era, DurationStats::from_samples(&era.delib_duration)))
        .collect();

    let (lo, hi) = rows
        .iter()
        .filter_map(|(_, stats)| stats.as_ref())
        .fold(None, |acc: Option<(i64, i64)>, s| match acc {
            None => Some((s.min, s.max)),
            Some((lo, hi)) => Some((lo.min(s.min), hi.max(s.max))),
        })
        .ok_or(ChartError::NoSamples("deliberation duration"))?;

    let lo = lo.min(0) as f64;
    let hi = (hi as f64).max(lo + 1.0);
    let plot_width = width.saturating_sub(2 * SIDE_MARGIN) as f64;
    let scale = |days: f64| SIDE_MARGIN as f64 + (days - lo) / (hi - lo) * plot_width;

    let height = TOP_MARGIN + rows.len() * ROW_HEIGHT + AXIS_HEIGHT;
    let axis_y = (TOP_MARGIN + rows.len() * ROW_HEIGHT) as f64;

    let mut svg = String::new();
    svg_open(&mut svg, width, height);
    svg_title(&mut svg, width, title);

    for (row, (era, stats)) in rows.iter().enumerate() {
        let top = (TOP_MARGIN + row * ROW_HEIGHT) as f64;
        let center = top + ROW_HEIGHT as f64 / 2.0 + 8.0;

        svg.push_str(&format!(
            r#"<text x="{}" y="{:.2}" font-size="12" text-anchor="middle">{}</text>"#,
            width / 2,
            top + 16.0,
            escape_xml(&era.title())
        ));

        let Some(stats) = stats else {
            svg.push_str(&format!(
                r#"<text x="{}" y="{:.2}" font-size="11" text-anchor="middle" fill="gray">no decided cases</text>"#,
                width / 2,
                center
            ));
            continue;
        };

        let (low_whisker, high_whisker, outliers) = whiskers(&era.delib_duration, stats);

        svg.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="black"/>"#,
            scale(low_whisker as f64),
            center,
            scale(high_whisker as f64),
            center
        ));
        for end in [low_whisker, high_whisker] {
            svg.push_str(&format!(
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="black"/>"#,
                scale(end as f64),
                center - BOX_HEIGHT / 4.0,
                scale(end as f64),
                center + BOX_HEIGHT / 4.0
            ));
        }
        svg.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" stroke="black"><title>{}</title></rect>"#,
            scale(stats.q1),
            center - BOX_HEIGHT / 2.0,
            (scale(stats.q3) - scale(stats.q1)).max(1.0),
            BOX_HEIGHT,
            BAR_FILL,
            escape_xml(&stats.summary())
        ));
        svg.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="orange" stroke-width="2"/>"#,
            scale(stats.median),
            center - BOX_HEIGHT / 2.0,
            scale(stats.median),
            center + BOX_HEIGHT / 2.0
        ));
        for outlier in outliers {
            svg.push_str(&format!(
                r#"<circle cx="{:.2}" cy="{:.2}" r="3" fill="none" stroke="black"/>"#,
                scale(outlier as f64),
                center
            ));
        }
    }

    // x axis
    svg.push_str(&format!(
        r#"<line x1="{}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="black"/>"#,
        SIDE_MARGIN,
        axis_y,
        SIDE_MARGIN as f64 + plot_width,
        axis_y
    ));
    for step in 0..=4 {
        let days = lo + (hi - lo) * step as f64 / 4.0;
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="10" text-anchor="middle">{:.0}</text>"#,
            scale(days),
            axis_y + 14.0,
            days
        ));
    }
    svg.push_str(&format!(
        r#"<text x="{}" y="{:.2}" font-size="12" text-anchor="middle">Number of Days</text>"#,
        width / 2,
        axis_y + 36.0
    ));

    svg.push_str("</svg>");
    info!("Box plot generated ({} bytes)", svg.len());
    Ok(svg)
}

/// Whisker ends and the samples beyond them
fn whiskers(samples: &[i64], stats: &DurationStats) -> (i64, i64, Vec<i64>) {
    let iqr = stats.q3 - stats.q1;
    let low_fence = stats.q1 - WHISKER_IQR * iqr;
    let high_fence = stats.q3 + WHISKER_IQR * iqr;

    let inside = |x: &i64| (*x as f64) >= low_fence && (*x as f64) <= high_fence;
    let low = samples.iter().copied().filter(inside).min().unwrap_or(stats.min);
    let high = samples.iter().copied().filter(inside).max().unwrap_or(stats.max);
    let outliers = samples.iter().copied().filter(|x| !inside(x)).collect();

    (low, high, outliers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::default_eras;

    #[test]
    fn test_boxplot_renders_each_era() {
        let mut eras = default_eras();
        eras[0].delib_duration = vec![1, 2, 3, 4, 5, 40];
        eras[2].delib_duration = vec![10, 12];

        let svg = render_delib_boxplot(&eras, None).unwrap();
        assert!(svg.contains(DELIB_CHART_TITLE));
        assert!(svg.contains("Early Republic (1783 to 1860)"));
        assert!(svg.contains("no decided cases"));
        assert_eq!(svg.matches("<circle").count(), 1);
        assert!(svg.contains("Number of Days"));
    }

    #[test]
    fn test_boxplot_without_samples() {
        assert!(matches!(
            render_delib_boxplot(&default_eras(), None),
            Err(ChartError::NoSamples(_))
        ));
        assert!(matches!(render_delib_boxplot(&[], None), Err(ChartError::NoEras)));
    }

    #[test]
    fn test_whiskers() {
        let samples = vec![1, 2, 3, 4, 5, 40];
        let stats = DurationStats::from_samples(&samples).unwrap();
        let (low, high, outliers) = whiskers(&samples, &stats);
        assert_eq!(low, 1);
        assert_eq!(high, 5);
        assert_eq!(outliers, vec![40]);
    }
}
