// This module contains the definition of `Stats`.
mod stats;

// Re-exports.
pub use stats::Stats;

/// Decimal digits used to print the accuracies of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Digits {
    /// Accuracies in the unit interval, like `0.7564`.
    Unit,
    /// Accuracies in percentage, like `75.64`.
    Percent,
}

impl Digits {
    /// Picks the convention from the first value of a group.
    pub fn detect(values: &[f64]) -> Self {
        match values.first() {
            Some(first) if *first < 1.0 => Self::Unit,
            _ => Self::Percent,
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Self::Unit => 4,
            Self::Percent => 2,
        }
    }

    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.count(), value)
    }
}

/// Renders values followed by their mean and standard deviation, e.g.
/// `75.84, 75.63, 75.45 -- 75.64 (0.16)`.
pub fn summary_line(values: &[f64], digits: Digits) -> String {
    let formatted: Vec<_> =
        values.iter().map(|value| digits.format(*value)).collect();
    let (mean, stddev) = match Stats::from(values) {
        Some(stats) => {
            (digits.format(stats.mean()), digits.format(stats.stddev()))
        }
        // nothing to summarize
        None => (String::from("0"), String::from("0")),
    };
    format!("{} -- {} ({})", formatted.join(", "), mean, stddev)
}
