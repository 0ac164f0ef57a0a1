//! Quality adjustment from profitability and leverage.

use peerval_primitives::{MetricsRecord, PeerMetric, PeerStatisticEntry, PeerStatistics};
use serde::Serialize;

use crate::QualityConfig;

/// Highest debt to equity ratio a target may report for the leverage term.
const MAX_TARGET_LEVERAGE: f64 = 10.0;

/// Outcome of quality scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityAdjustment {
    /// Multiplier applied to every base price.
    pub multiplier: f64,
    /// Capped ROE term, if it applied.
    pub roe_term: Option<f64>,
    /// Capped leverage term, if it applied.
    pub leverage_term: Option<f64>,
}

impl QualityAdjustment {
    /// No adjustment.
    pub const NEUTRAL: Self = Self { multiplier: 1.0, roe_term: None, leverage_term: None };
}

impl Default for QualityAdjustment {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Scores a target's ROE and leverage against its peers.
#[derive(Debug, Clone, Default)]
pub struct QualityScorer {
    config: QualityConfig,
}

impl QualityScorer {
    /// Create a scorer with custom configuration.
    #[must_use]
    pub const fn with_config(config: QualityConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &QualityConfig {
        &self.config
    }

    /// Score the target against the peer statistics.
    #[must_use]
    pub fn score(&self, target: &MetricsRecord, stats: &PeerStatistics) -> QualityAdjustment {
        let roe_term = self.roe_term(target, stats);
        let leverage_term = self.leverage_term(target, stats);

        let adjustment = match (roe_term, leverage_term) {
            (Some(roe), Some(lev)) => {
                let cap = self.config.combined_cap;
                ((roe + lev) / 2.0).clamp(-cap, cap)
            }
            (Some(term), None) | (None, Some(term)) => term,
            (None, None) => 0.0,
        };

        QualityAdjustment { multiplier: 1.0 + adjustment, roe_term, leverage_term }
    }

    fn roe_term(&self, target: &MetricsRecord, stats: &PeerStatistics) -> Option<f64> {
        let (lower, upper) = PeerMetric::ReturnOnEquity.plausible_range();
        let roe = target
            .metric(PeerMetric::ReturnOnEquity)
            .filter(|r| (lower..=upper).contains(r))?;
        let entry = usable(stats.get(PeerMetric::ReturnOnEquity))?;

        let z = (roe - entry.median) / entry.std;
        let cap = self.config.roe_cap;
        Some((z * self.config.roe_sensitivity).clamp(-cap, cap))
    }

    fn leverage_term(&self, target: &MetricsRecord, stats: &PeerStatistics) -> Option<f64> {
        let de = target
            .metric(PeerMetric::DebtToEquity)
            .filter(|d| (0.0..=MAX_TARGET_LEVERAGE).contains(d))?;
        let entry = usable(stats.get(PeerMetric::DebtToEquity))?;

        // Lower leverage than peers scores positively.
        let z = (entry.median - de) / entry.std;
        let cap = self.config.leverage_cap;
        Some((z * self.config.leverage_sensitivity).clamp(-cap, cap))
    }
}

fn usable(entry: Option<&PeerStatisticEntry>) -> Option<&PeerStatisticEntry> {
    entry.filter(|e| e.count >= 2 && e.std.is_finite() && e.std != 0.0)
}

/// Quality multiplier with the default scoring settings.
#[must_use]
pub fn quality_multiplier(target: &MetricsRecord, stats: &PeerStatistics) -> f64 {
    QualityScorer::default().score(target, stats).multiplier
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::*;

    fn entry(median: f64, std: f64) -> PeerStatisticEntry {
        PeerStatisticEntry {
            median,
            mean: median,
            p25: median,
            p75: median,
            std,
            count: 5,
            outliers_removed: 0,
        }
    }

    fn stats(roe: Option<PeerStatisticEntry>, de: Option<PeerStatisticEntry>) -> PeerStatistics {
        let mut stats = PeerStatistics::new();
        if let Some(e) = roe {
            stats.insert(PeerMetric::ReturnOnEquity, e);
        }
        if let Some(e) = de {
            stats.insert(PeerMetric::DebtToEquity, e);
        }
        stats
    }

    fn target(roe: Option<f64>, de: Option<f64>) -> MetricsRecord {
        MetricsRecord { return_on_equity: roe, debt_to_equity: de, ..MetricsRecord::empty("T") }
    }

    #[test]
    fn neutral_without_quality_data() {
        let adj = QualityScorer::default().score(&target(None, None), &PeerStatistics::new());
        assert_eq!(adj, QualityAdjustment::NEUTRAL);
    }

    #[test]
    fn roe_only_term() {
        // z = (0.25 - 0.15) / 0.05 = 2 -> 0.10
        let adj = QualityScorer::default()
            .score(&target(Some(0.25), None), &stats(Some(entry(0.15, 0.05)), None));
        assert_relative_eq!(adj.multiplier, 1.10, epsilon = 1e-12);
        assert!(adj.leverage_term.is_none());
    }

    #[test]
    fn roe_term_is_capped() {
        let adj = QualityScorer::default()
            .score(&target(Some(0.9), None), &stats(Some(entry(0.1, 0.01)), None));
        assert_relative_eq!(adj.multiplier, 1.15, epsilon = 1e-12);
    }

    #[test]
    fn leverage_is_inverted() {
        // Target carries more debt than peers: z = (1.0 - 3.0) / 1.0 = -2 -> -0.08
        let adj = QualityScorer::default()
            .score(&target(None, Some(3.0)), &stats(None, Some(entry(1.0, 1.0))));
        assert_relative_eq!(adj.multiplier, 0.92, epsilon = 1e-12);
    }

    #[test]
    fn both_terms_are_averaged() {
        // ROE term 0.10, leverage term 0.04 -> 0.07
        let adj = QualityScorer::default().score(
            &target(Some(0.25), Some(0.5)),
            &stats(Some(entry(0.15, 0.05)), Some(entry(1.0, 0.5))),
        );
        assert_relative_eq!(adj.roe_term.unwrap(), 0.10, epsilon = 1e-12);
        assert_relative_eq!(adj.leverage_term.unwrap(), 0.04, epsilon = 1e-12);
        assert_relative_eq!(adj.multiplier, 1.07, epsilon = 1e-12);
    }

    #[rstest]
    #[case(Some(1.5), None)]
    #[case(Some(-0.6), None)]
    #[case(None, Some(-0.1))]
    #[case(None, Some(12.0))]
    fn implausible_target_values_skip_terms(#[case] roe: Option<f64>, #[case] de: Option<f64>) {
        let adj = QualityScorer::default().score(
            &target(roe, de),
            &stats(Some(entry(0.1, 0.05)), Some(entry(1.0, 0.5))),
        );
        assert_eq!(adj, QualityAdjustment::NEUTRAL);
    }

    #[test]
    fn zero_dispersion_skips_term() {
        let adj = QualityScorer::default()
            .score(&target(Some(0.3), None), &stats(Some(entry(0.1, 0.0)), None));
        assert_eq!(adj.multiplier, 1.0);
    }

    #[test]
    fn multiplier_stays_within_bounds() {
        let peer_stats = stats(Some(entry(0.0, 0.001)), Some(entry(5.0, 0.001)));
        for roe in [-0.5, -0.2, 0.0, 0.4, 1.0] {
            for de in [0.0, 2.5, 5.0, 7.5, 10.0] {
                let m = quality_multiplier(&target(Some(roe), Some(de)), &peer_stats);
                assert!((0.8..=1.2).contains(&m), "multiplier {m} out of bounds");
            }
        }
    }
}
