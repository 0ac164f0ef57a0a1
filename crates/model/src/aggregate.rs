//! Peer statistic aggregation.
//!
//! Each tracked metric is summarized over the peers that report it. With at
//! least three samples, values are first screened with a wide IQR filter and
//! then with the metric's plausible domain range. Two samples are summarized
//! as reported.

use ndarray::Array1;
use peerval_math::{IqrFilter, Summary, retain_within};
use peerval_primitives::{MetricsRecord, PeerMetric, PeerStatisticEntry, PeerStatistics};
use tracing::debug;

use crate::{AggregationConfig, ValuationError};

/// Builds peer statistics from peer metrics records.
#[derive(Debug, Clone)]
pub struct PeerAggregator {
    config: AggregationConfig,
    filter: IqrFilter,
}

impl PeerAggregator {
    /// Create an aggregator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator with custom configuration.
    ///
    /// # Errors
    /// Returns `ValuationError::Math` if the IQR multiplier is invalid.
    pub fn with_config(config: AggregationConfig) -> Result<Self, ValuationError> {
        let filter = IqrFilter::new(config.iqr_multiplier)?;
        Ok(Self { config, filter })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Summarize every tracked metric across `peers`.
    ///
    /// The output does not depend on the order of `peers`.
    #[must_use]
    pub fn aggregate(&self, peers: &[MetricsRecord]) -> PeerStatistics {
        PeerMetric::ALL
            .into_iter()
            .filter_map(|metric| {
                let values: Array1<f64> = peers.iter().filter_map(|p| p.metric(metric)).collect();
                self.summarize(metric, &values).map(|entry| (metric, entry))
            })
            .collect()
    }

    fn summarize(&self, metric: PeerMetric, values: &Array1<f64>) -> Option<PeerStatisticEntry> {
        let original = values.len();
        if original < self.config.min_samples {
            debug!(%metric, samples = original, "insufficient peer data");
            return None;
        }

        if original < self.config.min_filter_samples {
            return Summary::from_values(values).ok().map(|s| to_entry(s, 0));
        }

        let filtered = self.filter.apply(values).ok()?;
        let (lower, upper) = metric.plausible_range();
        let cleaned = retain_within(&filtered, lower, upper);
        if cleaned.len() < self.config.min_samples {
            debug!(%metric, samples = original, kept = cleaned.len(), "too few peers left");
            return None;
        }

        let summary = Summary::from_values(&cleaned).ok()?;
        let removed = original - summary.count;
        if removed > 0 {
            debug!(%metric, removed, "removed peer outliers");
        }
        Some(to_entry(summary, removed))
    }
}

impl Default for PeerAggregator {
    fn default() -> Self {
        let config = AggregationConfig::default();
        Self { filter: IqrFilter::new(config.iqr_multiplier).unwrap_or_default(), config }
    }
}

const fn to_entry(summary: Summary, outliers_removed: usize) -> PeerStatisticEntry {
    PeerStatisticEntry {
        median: summary.median,
        mean: summary.mean,
        p25: summary.p25,
        p75: summary.p75,
        std: summary.std,
        count: summary.count,
        outliers_removed,
    }
}

/// Summarize peer metrics with the default aggregation settings.
#[must_use]
pub fn aggregate_peer_statistics(peers: &[MetricsRecord]) -> PeerStatistics {
    PeerAggregator::default().aggregate(peers)
}
