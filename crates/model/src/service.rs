//! End-to-end valuation requests against data providers.

use std::collections::HashSet;

use chrono::Utc;
use peerval_math::round_to;
use peerval_primitives::{MetricsRecord, Symbol, ValuationResult};
use peerval_traits::{MetricsProvider, PeerProvider};
use tracing::{debug, info, warn};

use crate::{PeerValuator, ValuationConfig, ValuationError};

/// Values tickers by fetching the target and its peers from providers.
#[derive(Debug)]
pub struct ValuationService<M, P> {
    metrics: M,
    peers: P,
    valuator: PeerValuator,
}

impl<M: MetricsProvider, P: PeerProvider> ValuationService<M, P> {
    /// Create a service with default configuration.
    pub fn new(metrics: M, peers: P) -> Self {
        Self { metrics, peers, valuator: PeerValuator::default() }
    }

    /// Create a service with custom configuration.
    ///
    /// # Errors
    /// Returns `ValuationError::InvalidConfig` if the configuration is invalid.
    pub fn with_config(
        metrics: M,
        peers: P,
        config: ValuationConfig,
    ) -> Result<Self, ValuationError> {
        Ok(Self { metrics, peers, valuator: PeerValuator::with_config(config)? })
    }

    /// Get the valuator.
    #[must_use]
    pub const fn valuator(&self) -> &PeerValuator {
        &self.valuator
    }

    /// Value a ticker against its peers.
    ///
    /// # Errors
    /// Returns `ValuationError::InvalidTicker` if the target has no usable
    /// market data.
    pub fn value(&self, symbol: impl Into<Symbol>) -> Result<ValuationResult, ValuationError> {
        let symbol = symbol.into();
        if symbol.is_empty() {
            return Err(ValuationError::InvalidTicker(symbol));
        }

        let target = self.metrics.fetch_metrics(&symbol);
        if !target.has_market_data() {
            warn!(%symbol, "no market data for target");
            return Err(ValuationError::InvalidTicker(symbol));
        }

        let (peers_used, peer_records) = self.resolve_peers(&symbol);
        let stats = self.valuator.aggregate(&peer_records);
        let valuation = self.valuator.value_target(&target, &stats);

        let current_price = target.price();
        let fair_value = valuation.price.map(|p| self.valuator.guard(p, current_price));
        let difference = fair_value.zip(current_price).map(|(fair, current)| fair - current);
        let difference_pct =
            difference.zip(current_price).map(|(diff, current)| diff / current * 100.0);

        let insights = self.valuator.explain(
            &target,
            &valuation.components,
            current_price,
            fair_value,
            &stats,
        );

        info!(
            %symbol,
            peers = peers_used.len(),
            method = %valuation.method,
            fair_value = ?fair_value,
            "valuation complete"
        );

        Ok(ValuationResult {
            symbol,
            timestamp: Utc::now(),
            current_price,
            fair_value,
            difference: difference.map(|d| round_to(d, 2)),
            difference_pct: difference_pct.map(|d| round_to(d, 2)),
            method: valuation.method,
            target_metrics: target,
            peer_count: peers_used.len(),
            peers_used,
            peer_statistics: stats,
            components: valuation.components,
            insights,
        })
    }

    /// Candidate peers: uppercased, deduplicated, without the target.
    fn peer_candidates(&self, symbol: &Symbol) -> Vec<Symbol> {
        let count = self.valuator.config().peer_count;
        let suggested = self.peers.suggest_peers(symbol, count).unwrap_or_else(|err| {
            warn!(%symbol, error = %err, "peer lookup failed");
            Vec::new()
        });

        let mut seen = HashSet::new();
        suggested
            .into_iter()
            .filter(|p| !p.is_empty() && p != symbol && seen.insert(p.clone()))
            .take(count)
            .collect()
    }

    /// Fetch candidate peers, keeping those with a resolvable market cap.
    fn resolve_peers(&self, symbol: &Symbol) -> (Vec<Symbol>, Vec<MetricsRecord>) {
        self.peer_candidates(symbol)
            .into_iter()
            .filter_map(|peer| {
                let record = self.metrics.fetch_metrics(&peer);
                if record.resolved_market_cap().is_some() {
                    Some((peer, record))
                } else {
                    debug!(%peer, "skipping peer without market cap");
                    None
                }
            })
            .unzip()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use approx::assert_relative_eq;
    use peerval_primitives::{MethodLabel, ValuationMethod};
    use peerval_traits::ProviderError;

    use super::*;
    use crate::INSUFFICIENT_DATA;

    struct MapMetrics(HashMap<Symbol, MetricsRecord>);

    impl MetricsProvider for MapMetrics {
        fn try_fetch_metrics(&self, symbol: &Symbol) -> Result<MetricsRecord, ProviderError> {
            self.0.get(symbol).cloned().ok_or_else(|| ProviderError::NotFound(symbol.clone()))
        }
    }

    struct FixedPeers(Vec<&'static str>);

    impl PeerProvider for FixedPeers {
        fn suggest_peers(&self, _: &Symbol, count: usize) -> Result<Vec<Symbol>, ProviderError> {
            Ok(self.0.iter().take(count).map(|s| Symbol::new(s)).collect())
        }
    }

    struct BrokenPeers;

    impl PeerProvider for BrokenPeers {
        fn suggest_peers(&self, _: &Symbol, _: usize) -> Result<Vec<Symbol>, ProviderError> {
            Err(ProviderError::Unavailable("timeout".to_string()))
        }
    }

    fn metrics(records: Vec<MetricsRecord>) -> MapMetrics {
        MapMetrics(records.into_iter().map(|r| (r.symbol.clone(), r)).collect())
    }

    fn peer(symbol: &str, pe: f64) -> MetricsRecord {
        MetricsRecord { market_cap: Some(5e9), pe_ratio: Some(pe), ..MetricsRecord::empty(symbol) }
    }

    fn target(eps: f64, price: f64) -> MetricsRecord {
        MetricsRecord {
            market_cap: Some(1e10),
            current_price: Some(price),
            earnings_per_share: Some(eps),
            ..MetricsRecord::empty("TGT")
        }
    }

    #[test]
    fn unknown_ticker_is_rejected() {
        let service = ValuationService::new(metrics(vec![]), FixedPeers(vec![]));
        let err = service.value("nope").unwrap_err();
        assert!(matches!(err, ValuationError::InvalidTicker(ref s) if s.as_str() == "NOPE"));
    }

    #[test]
    fn blank_ticker_is_rejected() {
        let service = ValuationService::new(metrics(vec![]), FixedPeers(vec![]));
        assert!(matches!(service.value("  "), Err(ValuationError::InvalidTicker(_))));
    }

    #[test]
    fn values_against_resolvable_peers() {
        let records = vec![
            target(2.0, 100.0),
            peer("AAA", 10.0),
            peer("BBB", 12.0),
            peer("CCC", 11.0),
            MetricsRecord { pe_ratio: Some(500.0), ..MetricsRecord::empty("NOCAP") },
        ];
        let service = ValuationService::new(
            metrics(records),
            FixedPeers(vec!["tgt", "aaa", "bbb", "AAA", "nocap", "ccc", "missing"]),
        );

        let result = service.value("tgt").unwrap();
        let used: Vec<&str> = result.peers_used.iter().map(Symbol::as_str).collect();
        assert_eq!(used, vec!["AAA", "BBB", "CCC"]);
        assert_eq!(result.peer_count, 3);
        assert_eq!(result.method, MethodLabel::Single(ValuationMethod::PriceToEarnings));

        let pe = result.components.get(ValuationMethod::PriceToEarnings).unwrap();
        assert_relative_eq!(pe.base_price, 22.0);
        assert_relative_eq!(pe.final_price, 25.0);
        assert!(pe.sanity_check_applied);

        assert_relative_eq!(result.fair_value.unwrap(), 25.0);
        assert_relative_eq!(result.difference.unwrap(), -75.0);
        assert_relative_eq!(result.difference_pct.unwrap(), -75.0);
        assert!(result.insights.iter().any(|i| i.contains("overvalued by 75.0%")));
    }

    #[test]
    fn peer_lookup_failure_gives_insufficient_data() {
        let service = ValuationService::new(metrics(vec![target(2.0, 50.0)]), BrokenPeers);
        let result = service.value("TGT").unwrap();

        assert!(result.peers_used.is_empty());
        assert!(result.peer_statistics.is_empty());
        assert_eq!(result.method, MethodLabel::InsufficientData);
        assert_eq!(result.fair_value, None);
        assert_eq!(result.difference, None);
        assert_eq!(result.insights, vec![INSUFFICIENT_DATA.to_string()]);
    }

    #[test]
    fn peer_count_limits_candidates() {
        let records = vec![target(2.0, 30.0), peer("A", 10.0), peer("B", 12.0), peer("C", 14.0)];
        let config = ValuationConfig { peer_count: 2, ..ValuationConfig::default() };
        let peers = FixedPeers(vec!["A", "B", "C"]);
        let service = ValuationService::with_config(metrics(records), peers, config).unwrap();

        let result = service.value("TGT").unwrap();
        assert_eq!(result.peer_count, 2);
    }

    #[test]
    fn composite_respects_guard() {
        let records = vec![
            MetricsRecord {
                market_cap: Some(1e10),
                current_price: Some(10.0),
                earnings_per_share: Some(3.0),
                book_value_per_share: Some(20.0),
                ..MetricsRecord::empty("TGT")
            },
            MetricsRecord {
                market_cap: Some(1e9),
                pe_ratio: Some(15.0),
                pb_ratio: Some(3.0),
                ..MetricsRecord::empty("A")
            },
            MetricsRecord {
                market_cap: Some(1e9),
                pe_ratio: Some(16.0),
                pb_ratio: Some(3.2),
                ..MetricsRecord::empty("B")
            },
        ];
        let service = ValuationService::new(metrics(records), FixedPeers(vec!["A", "B"]));

        let result = service.value("TGT").unwrap();
        assert_eq!(result.method, MethodLabel::Composite);
        // Both components hit the 4x sanity cap at 40; the composite guard is 2x.
        assert_relative_eq!(result.fair_value.unwrap(), 20.0);
    }
}
