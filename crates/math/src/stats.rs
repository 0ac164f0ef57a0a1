//! Order statistics over small samples.

use ndarray::Array1;

use crate::MathError;

/// Finite values of `data`, sorted ascending.
///
/// Sorting first makes every statistic below independent of input order.
#[must_use]
pub fn sorted_finite(data: &Array1<f64>) -> Array1<f64> {
    let mut values: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    values.sort_by(f64::total_cmp);
    Array1::from_vec(values)
}

/// Quantile of an ascending-sorted array using linear interpolation between
/// closest ranks.
fn quantile_sorted(sorted: &Array1<f64>, q: f64) -> f64 {
    let n = sorted.len();
    let pos = (n - 1) as f64 * q;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Quantile of the finite values in `data`.
///
/// # Errors
/// Returns `MathError::InvalidQuantile` if `q` is outside [0, 1] and
/// `MathError::EmptyData` if there are no finite values.
pub fn quantile(data: &Array1<f64>, q: f64) -> Result<f64, MathError> {
    if !(0.0..=1.0).contains(&q) {
        return Err(MathError::InvalidQuantile(q));
    }
    let sorted = sorted_finite(data);
    if sorted.is_empty() {
        return Err(MathError::EmptyData);
    }
    Ok(quantile_sorted(&sorted, q))
}

/// Median of the finite values in `data`.
///
/// # Errors
/// Returns `MathError::EmptyData` if there are no finite values.
pub fn median(data: &Array1<f64>) -> Result<f64, MathError> {
    quantile(data, 0.5)
}

/// Sample standard deviation (n - 1 denominator) of the finite values.
///
/// # Errors
/// Returns `MathError::InsufficientData` with fewer than two finite values.
pub fn sample_std(data: &Array1<f64>) -> Result<f64, MathError> {
    let sorted = sorted_finite(data);
    if sorted.len() < 2 {
        return Err(MathError::InsufficientData { required: 2, actual: sorted.len() });
    }
    Ok(sorted.std(1.0))
}

/// Round to a fixed number of decimal places.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Distribution summary of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Median.
    pub median: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// 25th percentile.
    pub p25: f64,
    /// 75th percentile.
    pub p75: f64,
    /// Sample standard deviation.
    pub std: f64,
    /// Number of finite values summarized.
    pub count: usize,
}

impl Summary {
    /// Summarize the finite values of `data`.
    ///
    /// # Errors
    /// Returns `MathError::InsufficientData` with fewer than two finite values.
    pub fn from_values(data: &Array1<f64>) -> Result<Self, MathError> {
        let sorted = sorted_finite(data);
        let count = sorted.len();
        if count < 2 {
            return Err(MathError::InsufficientData { required: 2, actual: count });
        }

        Ok(Self {
            median: quantile_sorted(&sorted, 0.5),
            mean: sorted.sum() / count as f64,
            p25: quantile_sorted(&sorted, 0.25),
            p75: quantile_sorted(&sorted, 0.75),
            std: sorted.std(1.0),
            count,
        })
    }

    /// Interquartile range.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.p75 - self.p25
    }
}
