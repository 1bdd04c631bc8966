/// Mean and standard deviation of a non-empty list of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    mean: f64,
    stddev: f64,
}

impl Stats {
    /// Returns `None` for an empty list.
    pub fn from(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len() as f64;
        let mean = values.iter().sum::<f64>() / count;
        let stddev = Self::compute_stddev(values, mean, count);
        Some(Self { mean, stddev })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn stddev(&self) -> f64 {
        self.stddev
    }

    fn compute_stddev(values: &[f64], mean: f64, count: f64) -> f64 {
        let sum = values
            .iter()
            .map(|x| {
                let diff = mean - x;
                diff * diff
            })
            .sum::<f64>();
        // population standard deviation (numpy's default)
        (sum / count).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn stats() {
        assert_eq!(Stats::from(&[]), None);

        let stats = Stats::from(&[1.0, 1.0, 1.0]).unwrap();
        assert!(close(stats.mean(), 1.0));
        assert!(close(stats.stddev(), 0.0));

        let stats = Stats::from(&[10.0, 20.0]).unwrap();
        assert!(close(stats.mean(), 15.0));
        assert!(close(stats.stddev(), 5.0));

        let stats = Stats::from(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0])
            .unwrap();
        assert!(close(stats.mean(), 5.0));
        assert!(close(stats.stddev(), 2.0));
    }
}
