//! Valuing a ticker against in-memory peers.
//!
//! Demonstrates:
//! - Building providers without any files
//! - Inspecting peer statistics and per-method components
//! - Tuning the valuation through `ValuationConfig`
//!
//! Run with: `cargo run -p peerval --example in_memory`

use peerval::{
    model::{SanityConfig, ValuationConfig, ValuationService},
    primitives::MetricsRecord,
    utils::{JsonMetricsProvider, StaticPeerProvider},
};

fn record(symbol: &str, pe: f64, pb: f64, roe: f64, de: f64) -> MetricsRecord {
    MetricsRecord {
        market_cap: Some(2.0e11),
        pe_ratio: Some(pe),
        pb_ratio: Some(pb),
        return_on_equity: Some(roe),
        debt_to_equity: Some(de),
        ..MetricsRecord::empty(symbol)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Peer Valuation (in memory) ===\n");

    let target = MetricsRecord {
        market_cap: Some(5.0e11),
        current_price: Some(195.0),
        earnings_per_share: Some(16.2),
        book_value_per_share: Some(92.0),
        return_on_equity: Some(0.17),
        debt_to_equity: Some(1.3),
        ..MetricsRecord::empty("JPM")
    };
    let metrics = JsonMetricsProvider::new([
        target,
        record("BAC", 13.1, 1.1, 0.09, 1.1),
        record("WFC", 11.8, 1.3, 0.11, 1.2),
        record("C", 16.9, 0.6, 0.05, 1.6),
        record("GS", 15.2, 1.4, 0.10, 2.4),
        record("MS", 17.4, 1.8, 0.12, 2.9),
        record("USB", 14.0, 1.4, 0.12, 1.0),
    ]);
    let peers =
        StaticPeerProvider::new().with_peers("JPM", ["BAC", "WFC", "C", "GS", "MS", "USB"]);

    let service = ValuationService::new(metrics.clone(), peers.clone());
    let result = service.value("JPM")?;

    println!("Peer statistics:");
    for (metric, entry) in result.peer_statistics.iter() {
        println!(
            "  {:<5} median {:>8.3}  IQR [{:>7.3}, {:>7.3}]  n={} removed={}",
            metric.label(),
            entry.median,
            entry.p25,
            entry.p75,
            entry.count,
            entry.outliers_removed
        );
    }
    result.print_summary();

    println!("With a tighter relative band (0.5x to 2x):");
    let config = ValuationConfig {
        sanity: SanityConfig { min_ratio: 0.5, max_ratio: 2.0, ..SanityConfig::default() },
        ..ValuationConfig::default()
    };
    let tight = ValuationService::with_config(metrics, peers, config)?.value("JPM")?;
    println!("  Fair value: {:?} ({})", tight.fair_value, tight.method);

    Ok(())
}
