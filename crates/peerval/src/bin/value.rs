//! Peer-multiple valuation CLI tool.
//!
//! Values a ticker against its peers using metrics and peer lists from JSON
//! files, optionally overlaying the latest market price from Yahoo Finance.
//!
//! Usage: `cargo run --features cli --bin value -- SYMBOL --data FILE --peers FILE`
//! Example: `cargo run --features cli --bin value -- AAPL --data metrics.json --peers peers.json`

use std::{fs, path::PathBuf, sync::Arc};

use clap::Parser;
use peerval::{
    model::{ValuationConfig, ValuationService},
    primitives::{MetricsRecord, Symbol},
    traits::{MetricsProvider, ProviderError},
    utils::{CachedMetricsProvider, JsonMetricsProvider, StaticPeerProvider, peer_frame},
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use yahoo_finance_api as yahoo;

/// Value a stock against the median multiples of its peers.
#[derive(Debug, Parser)]
#[command(name = "value", version, about)]
struct Cli {
    /// Ticker to value.
    symbol: String,

    /// JSON array of per-ticker metrics records.
    #[arg(long)]
    data: PathBuf,

    /// JSON object mapping tickers to peer lists.
    #[arg(long)]
    peers: PathBuf,

    /// JSON valuation config; omitted fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of peers to request.
    #[arg(long)]
    count: Option<usize>,

    /// Fetch the latest close from Yahoo Finance as the current price.
    #[arg(long)]
    live_price: bool,

    /// Print the result as JSON instead of a summary.
    #[arg(long)]
    json: bool,
}

/// Metrics provider that replaces one ticker's current price.
#[derive(Debug)]
struct PriceOverlay<P> {
    inner: P,
    symbol: Symbol,
    price: Option<f64>,
}

impl<P: MetricsProvider> MetricsProvider for PriceOverlay<P> {
    fn try_fetch_metrics(&self, symbol: &Symbol) -> Result<MetricsRecord, ProviderError> {
        let record = self.inner.try_fetch_metrics(symbol)?;
        match self.price {
            Some(price) if *symbol == self.symbol => Ok(record.with_current_price(Some(price))),
            _ => Ok(record),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let symbol = Symbol::new(&cli.symbol);

    let mut config = match &cli.config {
        Some(path) => serde_json::from_str::<ValuationConfig>(&fs::read_to_string(path)?)?,
        None => ValuationConfig::default(),
    };
    if let Some(count) = cli.count {
        config.peer_count = count;
    }

    let records = JsonMetricsProvider::from_path(&cli.data)?;
    let peers = StaticPeerProvider::from_path(&cli.peers)?;
    debug!(records = records.len(), "loaded inputs");

    let price = if cli.live_price { fetch_latest_close(&symbol).await } else { None };
    let metrics = Arc::new(CachedMetricsProvider::new(PriceOverlay {
        inner: records,
        symbol: symbol.clone(),
        price,
    }));

    let service = ValuationService::with_config(Arc::clone(&metrics), peers, config)?;
    let result = service.value(symbol)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let peer_records: Vec<MetricsRecord> =
        result.peers_used.iter().map(|p| metrics.fetch_metrics(p)).collect();
    println!("\nPEER METRICS:");
    println!("{}", peer_frame(&peer_records)?);

    result.print_summary();

    Ok(())
}

/// Latest close for a ticker, or `None` if Yahoo Finance cannot supply one.
async fn fetch_latest_close(symbol: &Symbol) -> Option<f64> {
    match latest_close(symbol).await {
        Ok(close) => Some(close),
        Err(e) => {
            warn!(%symbol, error = %e, "live price unavailable, using file price");
            None
        }
    }
}

async fn latest_close(symbol: &Symbol) -> Result<f64, yahoo::YahooError> {
    let provider = yahoo::YahooConnector::new()?;
    let response = provider.get_latest_quotes(symbol.as_str(), "1d").await?;
    Ok(response.last_quote()?.close)
}
