//! SVG chart generation for era statistics.
//!
//! Charts are rendered by hand as SVG strings:
//! - Weekday distribution of proceedings, one bar panel per era
//! - Month distribution of proceedings, one bar panel per era
//! - Deliberation durations, one horizontal box per era

pub mod bars;
pub mod boxplot;

// Re-export main types
pub use bars::{render_month_chart, render_weekday_chart};
pub use boxplot::render_delib_boxplot;

/// Chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: Option<String>,
    pub width: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: None,
            width: 900,
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the chart's built-in title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    fn title_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(default)
    }
}

const BAR_FILL: &str = "lightblue";
const BAR_STROKE: &str = "gray";

fn svg_open(out: &mut String, width: usize, height: usize) {
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        width, height, width, height
    ));
    out.push_str(r#"<rect x="0" y="0" width="100%" height="100%" fill="white"/>"#);
    out.push_str(r#"<style>text { font-family: sans-serif; }</style>"#);
}

fn svg_title(out: &mut String, width: usize, title: &str) {
    out.push_str(&format!(
        r#"<text x="{}" y="24" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        width / 2,
        escape_xml(title)
    ));
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
