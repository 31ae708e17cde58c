//! Robust statistics over a numeric series.

/// A simple numeric series for baseline statistics.
///
/// Every accessor is total: empty or degenerate series yield 0 rather than
/// NaN, so detector math never has to branch on missing baselines.
pub struct Series {
    values: Vec<f64>,
}

impl Series {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Population variance. Zero for fewer than two values.
    pub fn variance(&self) -> f64 {
        if self.values.len() < 2 {
            return 0.0;
        }
        let mean = self.mean();
        let sum_sq_diff: f64 = self.values.iter().map(|&x| (x - mean).powi(2)).sum();
        sum_sq_diff / self.values.len() as f64
    }

    /// Population standard deviation. Zero for fewer than two values.
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Middle value of the sorted series; average of the two middles for an
    /// even length. Zero if empty.
    pub fn median(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let mut sorted = self.values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        }
    }

    /// Median absolute deviation from the median. Zero if empty.
    pub fn mad(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let med = self.median();
        let deviations: Vec<f64> = self.values.iter().map(|v| (v - med).abs()).collect();
        Series::new(deviations).median()
    }
}
