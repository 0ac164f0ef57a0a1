//! Valuation configuration.

use serde::{Deserialize, Serialize};

use crate::ValuationError;

/// Configuration for peer statistic aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// IQR multiplier for the statistical outlier filter.
    pub iqr_multiplier: f64,
    /// Minimum samples for a metric to be reported.
    pub min_samples: usize,
    /// Minimum samples before outlier filtering is attempted.
    pub min_filter_samples: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self { iqr_multiplier: 2.0, min_samples: 2, min_filter_samples: 3 }
    }
}

/// Configuration for the quality adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Adjustment per standard deviation of ROE above the peer median.
    pub roe_sensitivity: f64,
    /// Absolute cap on the ROE term.
    pub roe_cap: f64,
    /// Adjustment per standard deviation of D/E below the peer median.
    pub leverage_sensitivity: f64,
    /// Absolute cap on the leverage term.
    pub leverage_cap: f64,
    /// Absolute cap on the averaged terms.
    pub combined_cap: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            roe_sensitivity: 0.05,
            roe_cap: 0.15,
            leverage_sensitivity: 0.04,
            leverage_cap: 0.10,
            combined_cap: 0.20,
        }
    }
}

/// Bounds applied to every per-method price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanityConfig {
    /// Lowest price as a fraction of the current price.
    pub min_ratio: f64,
    /// Highest price as a multiple of the current price.
    pub max_ratio: f64,
    /// Absolute price floor.
    pub floor: f64,
    /// Absolute price ceiling.
    pub ceiling: f64,
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self { min_ratio: 0.25, max_ratio: 4.0, floor: 0.01, ceiling: 10_000.0 }
    }
}

/// Full valuation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    /// Peer aggregation settings.
    pub aggregation: AggregationConfig,
    /// Quality adjustment settings.
    pub quality: QualityConfig,
    /// Per-method sanity bounds.
    pub sanity: SanityConfig,
    /// Composite price ceiling as a multiple of the current price.
    pub guard_multiple: f64,
    /// Number of peers requested from the peer provider.
    pub peer_count: usize,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            aggregation: AggregationConfig::default(),
            quality: QualityConfig::default(),
            sanity: SanityConfig::default(),
            guard_multiple: 2.0,
            peer_count: 15,
        }
    }
}

impl ValuationConfig {
    /// Check that every bound is well ordered and finite.
    ///
    /// # Errors
    /// Returns `ValuationError::InvalidConfig` describing the first bad field.
    pub fn validate(&self) -> Result<(), ValuationError> {
        let agg = &self.aggregation;
        if !agg.iqr_multiplier.is_finite() || agg.iqr_multiplier <= 0.0 {
            return Err(invalid("aggregation.iqr_multiplier must be positive"));
        }
        if agg.min_samples < 2 {
            return Err(invalid("aggregation.min_samples must be at least 2"));
        }
        if agg.min_filter_samples < agg.min_samples {
            return Err(invalid("aggregation.min_filter_samples must be >= min_samples"));
        }

        let q = &self.quality;
        let quality_fields = [
            ("quality.roe_sensitivity", q.roe_sensitivity),
            ("quality.roe_cap", q.roe_cap),
            ("quality.leverage_sensitivity", q.leverage_sensitivity),
            ("quality.leverage_cap", q.leverage_cap),
            ("quality.combined_cap", q.combined_cap),
        ];
        if let Some((name, _)) = quality_fields.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(invalid(&format!("{name} must be non-negative")));
        }

        let s = &self.sanity;
        if !(s.min_ratio > 0.0 && s.min_ratio <= s.max_ratio && s.max_ratio.is_finite()) {
            return Err(invalid("sanity ratios must satisfy 0 < min_ratio <= max_ratio"));
        }
        if !(s.floor >= 0.0 && s.floor <= s.ceiling && s.ceiling.is_finite()) {
            return Err(invalid("sanity bounds must satisfy 0 <= floor <= ceiling"));
        }

        if !self.guard_multiple.is_finite() || self.guard_multiple <= 0.0 {
            return Err(invalid("guard_multiple must be positive"));
        }
        if self.peer_count == 0 {
            return Err(invalid("peer_count must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> ValuationError {
    ValuationError::InvalidConfig(msg.to_string())
}
