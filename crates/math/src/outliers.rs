//! Outlier removal for small peer samples.

use ndarray::Array1;

use crate::{MathError, quantile};

/// Interquartile-range outlier filter.
///
/// Keeps values inside `[Q1 - k * IQR, Q3 + k * IQR]`.
#[derive(Debug, Clone, Copy)]
pub struct IqrFilter {
    /// IQR multiplier `k`.
    multiplier: f64,
}

impl IqrFilter {
    /// Create a new filter.
    ///
    /// # Errors
    /// Returns `MathError::InvalidMultiplier` if the multiplier is not
    /// positive and finite.
    pub fn new(multiplier: f64) -> Result<Self, MathError> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(MathError::InvalidMultiplier(multiplier));
        }
        Ok(Self { multiplier })
    }

    /// Get the multiplier.
    #[must_use]
    pub const fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Inclusive retention bounds for `data`.
    ///
    /// # Errors
    /// Returns `MathError::EmptyData` if there are no finite values.
    pub fn bounds(&self, data: &Array1<f64>) -> Result<(f64, f64), MathError> {
        let q1 = quantile(data, 0.25)?;
        let q3 = quantile(data, 0.75)?;
        let iqr = q3 - q1;
        Ok((q1 - self.multiplier * iqr, q3 + self.multiplier * iqr))
    }

    /// Retain the finite values of `data` within the IQR bounds.
    ///
    /// # Errors
    /// Returns `MathError::EmptyData` if there are no finite values.
    pub fn apply(&self, data: &Array1<f64>) -> Result<Array1<f64>, MathError> {
        let (lower, upper) = self.bounds(data)?;
        Ok(retain_within(data, lower, upper))
    }
}

impl Default for IqrFilter {
    fn default() -> Self {
        Self { multiplier: 1.5 }
    }
}

/// Finite values of `data` inside the closed range `[lower, upper]`, in input
/// order.
#[must_use]
pub fn retain_within(data: &Array1<f64>, lower: f64, upper: f64) -> Array1<f64> {
    data.iter().copied().filter(|x| x.is_finite() && *x >= lower && *x <= upper).collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;
    use rstest::rstest;

    use super::*;

    #[test]
    fn removes_single_extreme_value() {
        let data = array![10.0, 10.0, 10.0, 10.0, 1000.0];
        let kept = IqrFilter::new(2.0).unwrap().apply(&data).unwrap();
        assert_eq!(kept, array![10.0, 10.0, 10.0, 10.0]);
    }

    #[test]
    fn wide_multiplier_keeps_moderate_spread() {
        let data = array![8.0, 10.0, 12.0, 14.0, 25.0];
        let filter = IqrFilter::new(2.0).unwrap();
        let (lower, upper) = filter.bounds(&data).unwrap();
        assert_relative_eq!(lower, 2.0);
        assert_relative_eq!(upper, 22.0);
        assert_eq!(filter.apply(&data).unwrap().len(), 4);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::INFINITY)]
    fn invalid_multiplier_errors(#[case] k: f64) {
        assert!(IqrFilter::new(k).is_err());
    }

    #[test]
    fn retain_within_is_inclusive() {
        let data = array![-0.5, 0.2, 1.0, 1.5, f64::NAN];
        assert_eq!(retain_within(&data, -0.5, 1.0), array![-0.5, 0.2, 1.0]);
    }

    #[test]
    fn default_multiplier() {
        assert_relative_eq!(IqrFilter::default().multiplier(), 1.5);
    }
}
