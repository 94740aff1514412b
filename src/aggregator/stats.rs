//! Descriptive statistics over era accumulators.

use log::debug;

/// Share of each bucket in percent
///
/// An all-zero input yields all zeros.
pub fn percentages(counts: &[u64]) -> Vec<f64> {
    let total: u64 = counts.iter().sum();
    if total == 0 {
        return vec![0.0; counts.len()];
    }

    counts
        .iter()
        .map(|&count| 100.0 * count as f64 / total as f64)
        .collect()
}

/// Summary of a set of deliberation durations, in days
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub count: usize,
    pub min: i64,
    pub max: i64,
    pub median: f64,
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub q1: f64,
    pub q3: f64,
}

impl DurationStats {
    /// `None` for an empty sample
    pub fn from_samples(samples: &[i64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_unstable();

        let count = sorted.len();
        let mean = sorted.iter().sum::<i64>() as f64 / count as f64;
        let variance = sorted
            .iter()
            .map(|&x| (x as f64 - mean).powi(2))
            .sum::<f64>()
            / count as f64;

        debug!("Computed duration stats over {} samples", count);

        Some(Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            median: quantile(&sorted, 0.5),
            mean,
            std_dev: variance.sqrt(),
            q1: quantile(&sorted, 0.25),
            q3: quantile(&sorted, 0.75),
        })
    }

    pub fn summary(&self) -> String {
        format!(
            "N: {}, min: {}, max: {}, median: {:.1}, mean: {:.2}, std dev: {:.2}",
            self.count, self.min, self.max, self.median, self.mean, self.std_dev
        )
    }
}

/// Linear-interpolated quantile of sorted data
fn quantile(sorted: &[i64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let fraction = pos - lower as f64;
    sorted[lower] as f64 + (sorted[upper] - sorted[lower]) as f64 * fraction
}
