//! Bar chart panels: one panel per era, sharing the x categories and y scale.

use super::{escape_xml, svg_open, svg_title, ChartConfig, BAR_FILL, BAR_STROKE};
use crate::aggregator::{percentages, Era};
use crate::utils::config::{MONTH_ABBREVIATIONS, WEEKDAY_ABBREVIATIONS};
use crate::utils::error::ChartError;
use log::info;

pub const WEEKDAY_CHART_TITLE: &str = "SCOTUS Public Proceedings by Day of Week and Historical Era";
pub const MONTH_CHART_TITLE: &str = "SCOTUS Public Proceedings by Month and Historical Era";

const PANEL_HEIGHT: usize = 170;
const PANEL_GAP: usize = 40;
const TOP_MARGIN: usize = 50;
const LEFT_MARGIN: usize = 60;
const RIGHT_MARGIN: usize = 20;
const AXIS_LABEL_HEIGHT: usize = 20;

/// Percent of proceedings by weekday, one panel per era
pub fn render_weekday_chart(eras: &[Era], config: Option<&ChartConfig>) -> Result<String, ChartError> {
    let config = config.cloned().unwrap_or_default();
    let panels: Vec<(String, Vec<f64>)> = eras
        .iter()
        .map(|era| (era.title(), percentages(&era.day_counts)))
        .collect();

    render_panels(
        config.title_or(WEEKDAY_CHART_TITLE),
        &WEEKDAY_ABBREVIATIONS,
        &panels,
        config.width,
    )
}

/// Percent of proceedings by month, one panel per era
pub fn render_month_chart(eras: &[Era], config: Option<&ChartConfig>) -> Result<String, ChartError> {
    let config = config.cloned().unwrap_or_default();
    let panels: Vec<(String, Vec<f64>)> = eras
        .iter()
        .map(|era| (era.title(), percentages(&era.month_counts)))
        .collect();

    render_panels(
        config.title_or(MONTH_CHART_TITLE),
        &MONTH_ABBREVIATIONS,
        &panels,
        config.width,
    )
}

/// Render panels that share one y scale (percent of days)
fn render_panels(
    title: &str,
    labels: &[&str],
    panels: &[(String, Vec<f64>)],
    width: usize,
) -> Result<String, ChartError> {
    if panels.is_empty() {
        return Err(ChartError::NoEras);
    }

    // Shared y axis, rounded up to the next 10%
    let max_value = panels
        .iter()
        .flat_map(|(_, values)| values.iter().copied())
        .fold(0.0_f64, f64::max);
    let y_max = ((max_value / 10.0).ceil() * 10.0).max(10.0);

    let height = TOP_MARGIN + panels.len() * (PANEL_HEIGHT + PANEL_GAP) + AXIS_LABEL_HEIGHT;
    let plot_width = width.saturating_sub(LEFT_MARGIN + RIGHT_MARGIN) as f64;
    let slot = plot_width / labels.len().max(1) as f64;
    let bar_width = slot * 0.8;

    let mut svg = String::new();
    svg_open(&mut svg, width, height);
    svg_title(&mut svg, width, title);

    for (panel_index, (panel_title, values)) in panels.iter().enumerate() {
        let top = TOP_MARGIN + panel_index * (PANEL_HEIGHT + PANEL_GAP);
        let bottom = (top + PANEL_HEIGHT) as f64;

        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="12" text-anchor="middle">{}</text>"#,
            LEFT_MARGIN as f64 + plot_width / 2.0,
            top + 12,
            escape_xml(panel_title)
        ));
        svg.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{:.2}" height="{}" fill="none" stroke="black"/>"#,
            LEFT_MARGIN,
            top + 16,
            plot_width,
            PANEL_HEIGHT - 16
        ));
        svg.push_str(&format!(
            r#"<text x="14" y="{:.2}" font-size="11" transform="rotate(-90 14 {:.2})" text-anchor="middle">Percent of Days</text>"#,
            bottom - PANEL_HEIGHT as f64 / 2.0,
            bottom - PANEL_HEIGHT as f64 / 2.0
        ));

        let bar_area = (PANEL_HEIGHT - 16) as f64;
        for tick in [0.0, y_max / 2.0, y_max] {
            let y = bottom - bar_area * tick / y_max;
            svg.push_str(&format!(
                r#"<text x="{}" y="{:.2}" font-size="10" text-anchor="end">{:.0}</text>"#,
                LEFT_MARGIN - 4,
                y + 3.0,
                tick
            ));
        }

        for (i, value) in values.iter().enumerate() {
            let bar_height = bar_area * value / y_max;
            let x = LEFT_MARGIN as f64 + i as f64 * slot + (slot - bar_width) / 2.0;
            svg.push_str(&format!(
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" stroke="{}"><title>{} {:.1}%</title></rect>"#,
                x,
                bottom - bar_height,
                bar_width,
                bar_height,
                BAR_FILL,
                BAR_STROKE,
                labels.get(i).copied().unwrap_or(""),
                value
            ));
        }

        for (i, label) in labels.iter().enumerate() {
            svg.push_str(&format!(
                r#"<text x="{:.2}" y="{:.2}" font-size="11" text-anchor="middle">{}</text>"#,
                LEFT_MARGIN as f64 + (i as f64 + 0.5) * slot,
                bottom + 14.0,
                label
            ));
        }
    }

    svg.push_str("</svg>");
    info!("Bar chart '{}' generated ({} bytes)", title, svg.len());
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::default_eras;

    #[test]
    fn test_weekday_chart_has_panel_per_era() {
        let mut eras = default_eras();
        eras[0].day_counts = [0, 5, 3, 2, 0, 0, 0];

        let svg = render_weekday_chart(&eras, None).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Early Republic (1783 to 1860)"));
        assert!(svg.contains("Civil War (1861 to 1865)"));
        assert!(svg.contains("Mon 50.0%"));
        assert_eq!(svg.matches("<title>").count(), 7 * eras.len());
    }

    #[test]
    fn test_month_chart_labels_and_title_override() {
        let eras = default_eras();
        let config = ChartConfig::new().with_title("Months");
        let svg = render_month_chart(&eras, Some(&config)).unwrap();
        assert!(svg.contains(">Months<"));
        assert!(svg.contains(">Dec<"));
    }

    #[test]
    fn test_no_eras() {
        assert!(matches!(render_weekday_chart(&[], None), Err(ChartError::NoEras)));
    }
}
