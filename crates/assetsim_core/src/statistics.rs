//! Descriptive statistics of historical return samples

use serde::{Deserialize, Serialize};

/// Summary of a return sample.
///
/// Moments are population (biased) estimates, so skewness and excess kurtosis
/// agree with the usual `skew`/`kurtosis` defaults of statistics packages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalStatistics {
    pub observations: usize,
    pub arithmetic_mean: f64,
    pub std_dev: f64,
    pub skewness: f64,
    pub excess_kurtosis: f64,
    pub min: f64,
    pub max: f64,
}

impl HistoricalStatistics {
    /// Compute statistics of a sample. Returns `None` for an empty sample.
    ///
    /// A constant sample reports zero spread, skewness and excess kurtosis.
    #[must_use]
    pub fn from_sample(sample: &[f64]) -> Option<Self> {
        if sample.is_empty() {
            return None;
        }
        let n = sample.len() as f64;
        let min = sample.iter().copied().fold(f64::INFINITY, f64::min);
        let max = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            return Some(Self {
                observations: sample.len(),
                arithmetic_mean: min,
                std_dev: 0.0,
                skewness: 0.0,
                excess_kurtosis: 0.0,
                min,
                max,
            });
        }

        let arithmetic_mean = sample.iter().sum::<f64>() / n;

        let (m2, m3, m4) = sample.iter().fold((0.0, 0.0, 0.0), |(m2, m3, m4), r| {
            let d = r - arithmetic_mean;
            let d2 = d * d;
            (m2 + d2, m3 + d2 * d, m4 + d2 * d2)
        });
        let (m2, m3, m4) = (m2 / n, m3 / n, m4 / n);
        let std_dev = m2.sqrt();
        let skewness = m3 / m2.powf(1.5);
        let excess_kurtosis = m4 / (m2 * m2) - 3.0;

        Some(Self {
            observations: sample.len(),
            arithmetic_mean,
            std_dev,
            skewness,
            excess_kurtosis,
            min,
            max,
        })
    }

    /// True when every observation has the same value
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }
}
