//! Peer-multiple valuation of a single target.

use peerval_primitives::{
    MethodLabel, MetricsRecord, PeerStatistics, ValuationComponents, ValuationMethod,
};

use crate::{
    PeerAggregator, QualityAdjustment, QualityScorer, ValuationConfig, ValuationError, blend,
    explain, guard_price, value_method,
};

/// Per-method components and their blend for one target.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetValuation {
    /// Fired components.
    pub components: ValuationComponents,
    /// Blended price before the composite guard.
    pub price: Option<f64>,
    /// How the price was obtained.
    pub method: MethodLabel,
    /// Quality adjustment applied to every component.
    pub quality: QualityAdjustment,
}

/// Stateless peer-multiple valuator.
///
/// Holds only configuration, so one instance can value many targets
/// concurrently.
#[derive(Debug, Clone)]
pub struct PeerValuator {
    config: ValuationConfig,
    aggregator: PeerAggregator,
    scorer: QualityScorer,
}

impl PeerValuator {
    /// Create a valuator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a valuator with custom configuration.
    ///
    /// # Errors
    /// Returns `ValuationError::InvalidConfig` if the configuration is invalid.
    pub fn with_config(config: ValuationConfig) -> Result<Self, ValuationError> {
        config.validate()?;
        Ok(Self {
            aggregator: PeerAggregator::with_config(config.aggregation)?,
            scorer: QualityScorer::with_config(config.quality),
            config,
        })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Summarize peer metrics.
    #[must_use]
    pub fn aggregate(&self, peers: &[MetricsRecord]) -> PeerStatistics {
        self.aggregator.aggregate(peers)
    }

    /// Value the target against peer statistics.
    #[must_use]
    pub fn value_target(&self, target: &MetricsRecord, stats: &PeerStatistics) -> TargetValuation {
        let quality = self.scorer.score(target, stats);
        let components: ValuationComponents = ValuationMethod::ALL
            .into_iter()
            .filter_map(|method| {
                value_method(method, target, stats, quality.multiplier, &self.config.sanity)
                    .map(|c| (method, c))
            })
            .collect();
        let blended = blend(&components);

        TargetValuation { components, price: blended.price, method: blended.method, quality }
    }

    /// Bound a blended price by the composite guard.
    #[must_use]
    pub fn guard(&self, price: f64, current_price: Option<f64>) -> f64 {
        guard_price(price, current_price, self.config.guard_multiple)
    }

    /// Explain a valuation.
    #[must_use]
    pub fn explain(
        &self,
        target: &MetricsRecord,
        components: &ValuationComponents,
        current_price: Option<f64>,
        composite_price: Option<f64>,
        stats: &PeerStatistics,
    ) -> Vec<String> {
        explain(target, components, current_price, composite_price, stats)
    }
}

impl Default for PeerValuator {
    fn default() -> Self {
        let config = ValuationConfig::default();
        Self {
            aggregator: PeerAggregator::default(),
            scorer: QualityScorer::with_config(config.quality),
            config,
        }
    }
}

/// Value the target with the default settings.
#[must_use]
pub fn value_target(target: &MetricsRecord, stats: &PeerStatistics) -> TargetValuation {
    PeerValuator::default().value_target(target, stats)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use peerval_primitives::PeerMetric;

    use super::*;
    use crate::{INSUFFICIENT_DATA, aggregate_peer_statistics};

    fn peer(symbol: &str, pe: f64, pb: f64, ps: f64) -> MetricsRecord {
        MetricsRecord {
            market_cap: Some(1e9),
            pe_ratio: Some(pe),
            pb_ratio: Some(pb),
            ps_ratio: Some(ps),
            ..MetricsRecord::empty(symbol)
        }
    }

    #[test]
    fn single_method_is_labelled_by_name() {
        let peers = vec![peer("A", 15.0, 2.0, 3.0), peer("B", 17.0, 2.5, 3.5)];
        let target = MetricsRecord {
            earnings_per_share: Some(4.0),
            current_price: Some(60.0),
            ..MetricsRecord::empty("T")
        };

        let stats = aggregate_peer_statistics(&peers);
        let valuation = value_target(&target, &stats);

        assert_eq!(valuation.components.len(), 1);
        assert_eq!(valuation.method, MethodLabel::Single(ValuationMethod::PriceToEarnings));
        assert_eq!(valuation.method.to_string(), "PE_VALUATION");
        assert_relative_eq!(valuation.price.unwrap(), 64.0);
    }

    #[test]
    fn low_multiple_is_capped_against_price() {
        let peers =
            vec![peer("A", 10.0, 0.0, 0.0), peer("B", 12.0, 0.0, 0.0), peer("C", 11.0, 0.0, 0.0)];
        let target = MetricsRecord {
            earnings_per_share: Some(2.0),
            current_price: Some(100.0),
            ..MetricsRecord::empty("T")
        };

        let stats = aggregate_peer_statistics(&peers);
        assert_relative_eq!(stats.get(PeerMetric::PeRatio).unwrap().median, 11.0);

        let valuation = value_target(&target, &stats);
        let pe = valuation.components.get(ValuationMethod::PriceToEarnings).unwrap();
        assert_relative_eq!(valuation.quality.multiplier, 1.0);
        assert_relative_eq!(pe.base_price, 22.0);
        assert_relative_eq!(pe.final_price, 25.0);
        assert!(pe.sanity_check_applied);
    }

    #[test]
    fn no_peers_is_insufficient_data() {
        let target = MetricsRecord {
            earnings_per_share: Some(2.0),
            book_value_per_share: Some(10.0),
            current_price: Some(30.0),
            ..MetricsRecord::empty("T")
        };
        let stats = aggregate_peer_statistics(&[]);
        let valuation = value_target(&target, &stats);

        assert!(stats.is_empty());
        assert!(valuation.components.is_empty());
        assert_eq!(valuation.method, MethodLabel::InsufficientData);
        assert_eq!(valuation.price, None);
        assert_eq!(
            explain(&target, &valuation.components, target.price(), valuation.price, &stats),
            vec![INSUFFICIENT_DATA.to_string()]
        );
    }

    #[test]
    fn all_methods_blend_into_composite() {
        let peers = vec![
            peer("A", 18.0, 3.0, 4.0),
            peer("B", 20.0, 3.5, 4.5),
            peer("C", 22.0, 4.0, 5.0),
            peer("D", 19.0, 3.2, 4.2),
            peer("E", 21.0, 3.8, 4.8),
        ];
        let target = MetricsRecord {
            earnings_per_share: Some(5.0),
            book_value_per_share: Some(30.0),
            revenue_per_share: Some(25.0),
            current_price: Some(100.0),
            ..MetricsRecord::empty("T")
        };

        let valuator = PeerValuator::new();
        let stats = valuator.aggregate(&peers);
        let valuation = valuator.value_target(&target, &stats);

        assert_eq!(valuation.components.len(), 3);
        assert_eq!(valuation.method, MethodLabel::Composite);
        // Equal confidences: mean of 100 (P/E), 105 (P/B) and 112.5 (P/S).
        assert_relative_eq!(valuation.price.unwrap(), 105.83, epsilon = 1e-9);
    }

    #[test]
    fn component_prices_stay_in_bands() {
        let peers = vec![peer("A", 90.0, 19.0, 29.0), peer("B", 95.0, 19.5, 29.5)];
        for (eps, price) in [(0.01, 500.0), (50.0, 3.0), (200.0, 9_000.0), (0.0001, 0.02)] {
            let target = MetricsRecord {
                earnings_per_share: Some(eps),
                book_value_per_share: Some(eps),
                revenue_per_share: Some(eps),
                current_price: Some(price),
                ..MetricsRecord::empty("T")
            };
            let stats = aggregate_peer_statistics(&peers);
            for (_, c) in value_target(&target, &stats).components.iter() {
                assert!((0.01..=10_000.0).contains(&c.final_price));
                if price * 0.25 >= 0.01 && price * 4.0 <= 10_000.0 {
                    assert!((price * 0.25..=price * 4.0).contains(&c.final_price));
                }
            }
        }
    }

    #[test]
    fn guard_limits_composite() {
        let valuator = PeerValuator::new();
        assert_relative_eq!(valuator.guard(350.0, Some(100.0)), 200.0);
        assert_relative_eq!(valuator.guard(150.0, Some(100.0)), 150.0);
    }

    #[test]
    fn invalid_config_rejected() {
        let config = ValuationConfig { guard_multiple: -1.0, ..ValuationConfig::default() };
        assert!(PeerValuator::with_config(config).is_err());
    }
}
