//! Error types for statistical operations.

/// Errors that can occur during statistical operations.
#[derive(Debug, thiserror::Error)]
pub enum MathError {
    /// Quantile outside [0, 1].
    #[error("invalid quantile: {0} (must be in [0, 1])")]
    InvalidQuantile(f64),

    /// Non-positive or non-finite IQR multiplier.
    #[error("invalid IQR multiplier: {0} (must be positive and finite)")]
    InvalidMultiplier(f64),

    /// Empty data.
    #[error("empty data provided")]
    EmptyData,

    /// Too few observations for the statistic.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },
}
