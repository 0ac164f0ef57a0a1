//! Peer statistic type definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A metric tracked across the peer group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeerMetric {
    /// Price to earnings ratio.
    PeRatio,
    /// Price to book ratio.
    PbRatio,
    /// Price to sales ratio.
    PsRatio,
    /// Return on equity.
    ReturnOnEquity,
    /// Debt to equity ratio.
    DebtToEquity,
}

impl PeerMetric {
    /// Every tracked metric, valuation multiples first.
    pub const ALL: [Self; 5] =
        [Self::PeRatio, Self::PbRatio, Self::PsRatio, Self::ReturnOnEquity, Self::DebtToEquity];

    /// Metrics used as valuation multiples.
    pub const VALUATION_MULTIPLES: [Self; 3] = [Self::PeRatio, Self::PbRatio, Self::PsRatio];

    /// Metrics used for quality adjustment.
    pub const QUALITY: [Self; 2] = [Self::ReturnOnEquity, Self::DebtToEquity];

    /// Field name of the metric.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PeRatio => "pe_ratio",
            Self::PbRatio => "pb_ratio",
            Self::PsRatio => "ps_ratio",
            Self::ReturnOnEquity => "return_on_equity",
            Self::DebtToEquity => "debt_to_equity",
        }
    }

    /// Short human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PeRatio => "P/E",
            Self::PbRatio => "P/B",
            Self::PsRatio => "P/S",
            Self::ReturnOnEquity => "ROE",
            Self::DebtToEquity => "D/E",
        }
    }

    /// Domain bounds outside which a peer value is implausible.
    #[must_use]
    pub const fn plausible_range(&self) -> (f64, f64) {
        match self {
            Self::PeRatio => (f64::NEG_INFINITY, 100.0),
            Self::PbRatio => (f64::NEG_INFINITY, 20.0),
            Self::PsRatio => (f64::NEG_INFINITY, 30.0),
            Self::ReturnOnEquity => (-0.5, 1.0),
            Self::DebtToEquity => (f64::NEG_INFINITY, 10.0),
        }
    }

    /// Whether this is a valuation multiple.
    #[must_use]
    pub const fn is_valuation_multiple(&self) -> bool {
        matches!(self, Self::PeRatio | Self::PbRatio | Self::PsRatio)
    }
}

impl std::fmt::Display for PeerMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Distribution of one metric across the cleaned peer set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeerStatisticEntry {
    /// Median value.
    pub median: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// 25th percentile.
    pub p25: f64,
    /// 75th percentile.
    pub p75: f64,
    /// Sample standard deviation.
    pub std: f64,
    /// Number of values used after cleaning.
    pub count: usize,
    /// Number of values removed as outliers.
    pub outliers_removed: usize,
}

/// Peer statistics keyed by metric.
///
/// Only metrics with at least two cleaned samples are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerStatistics(BTreeMap<PeerMetric, PeerStatisticEntry>);

impl PeerStatistics {
    /// Create an empty statistics map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert an entry, replacing any previous one for the metric.
    pub fn insert(&mut self, metric: PeerMetric, entry: PeerStatisticEntry) {
        self.0.insert(metric, entry);
    }

    /// Get the entry for a metric.
    #[must_use]
    pub fn get(&self, metric: PeerMetric) -> Option<&PeerStatisticEntry> {
        self.0.get(&metric)
    }

    /// Iterate entries in metric order.
    pub fn iter(&self) -> impl Iterator<Item = (PeerMetric, &PeerStatisticEntry)> {
        self.0.iter().map(|(m, e)| (*m, e))
    }

    /// Number of metrics present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Outlier counts for valuation multiples that had outliers removed.
    #[must_use]
    pub fn multiple_outliers(&self) -> Vec<(PeerMetric, usize)> {
        self.iter()
            .filter(|(m, e)| m.is_valuation_multiple() && e.outliers_removed > 0)
            .map(|(m, e)| (m, e.outliers_removed))
            .collect()
    }
}

impl FromIterator<(PeerMetric, PeerStatisticEntry)> for PeerStatistics {
    fn from_iter<I: IntoIterator<Item = (PeerMetric, PeerStatisticEntry)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(outliers_removed: usize) -> PeerStatisticEntry {
        PeerStatisticEntry {
            median: 1.0,
            mean: 1.0,
            p25: 1.0,
            p75: 1.0,
            std: 0.0,
            count: 3,
            outliers_removed,
        }
    }

    #[test]
    fn metric_groups() {
        assert!(PeerMetric::VALUATION_MULTIPLES.iter().all(PeerMetric::is_valuation_multiple));
        assert!(!PeerMetric::QUALITY.iter().any(PeerMetric::is_valuation_multiple));
        assert_eq!(PeerMetric::ReturnOnEquity.plausible_range(), (-0.5, 1.0));
    }

    #[test]
    fn multiple_outliers_skips_quality_metrics() {
        let stats: PeerStatistics = [
            (PeerMetric::PeRatio, entry(2)),
            (PeerMetric::PbRatio, entry(0)),
            (PeerMetric::ReturnOnEquity, entry(1)),
        ]
        .into_iter()
        .collect();

        assert_eq!(stats.multiple_outliers(), vec![(PeerMetric::PeRatio, 2)]);
    }

    #[test]
    fn serializes_with_metric_names() {
        let stats: PeerStatistics = [(PeerMetric::PsRatio, entry(0))].into_iter().collect();
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("ps_ratio").is_some());
    }
}
