//! Tabular views of peer metrics.

use peerval_primitives::{MetricsRecord, PeerMetric};
use polars::prelude::*;

/// Lay out peer metrics as a `DataFrame`, one row per peer.
///
/// Columns are `symbol`, `market_cap` and one column per [`PeerMetric`] in
/// its canonical order. Absent or non-finite values are nulls.
///
/// # Errors
/// Returns `PolarsError` if the frame cannot be assembled.
pub fn peer_frame(peers: &[MetricsRecord]) -> PolarsResult<DataFrame> {
    let symbols: Vec<&str> = peers.iter().map(|p| p.symbol.as_str()).collect();
    let market_caps: Vec<Option<f64>> =
        peers.iter().map(MetricsRecord::resolved_market_cap).collect();

    let mut columns = vec![
        Column::new("symbol".into(), symbols),
        Column::new("market_cap".into(), market_caps),
    ];
    columns.extend(PeerMetric::ALL.into_iter().map(|metric| {
        let values: Vec<Option<f64>> = peers.iter().map(|p| p.metric(metric)).collect();
        Column::new(metric.name().into(), values)
    }));

    DataFrame::new(columns)
}
