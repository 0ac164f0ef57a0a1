//! File- and map-backed data providers.

use std::{collections::HashMap, fs, path::Path};

use peerval_primitives::{MetricsRecord, Symbol};
use peerval_traits::{MetricsProvider, PeerProvider, ProviderError};
use tracing::debug;

use crate::UtilsError;

/// Metrics provider over records loaded up front.
///
/// The input is a JSON array of records, each carrying its `symbol`. Later
/// records for the same symbol replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct JsonMetricsProvider {
    records: HashMap<Symbol, MetricsRecord>,
}

impl JsonMetricsProvider {
    /// Build a provider from records.
    pub fn new(records: impl IntoIterator<Item = MetricsRecord>) -> Self {
        Self { records: records.into_iter().map(|r| (r.symbol.clone(), r)).collect() }
    }

    /// Parse records from a JSON string.
    ///
    /// # Errors
    /// Returns `UtilsError::Json` if the input is not an array of records.
    pub fn from_json_str(json: &str) -> Result<Self, UtilsError> {
        let records: Vec<MetricsRecord> = serde_json::from_str(json)?;
        debug!(records = records.len(), "loaded metrics records");
        Ok(Self::new(records))
    }

    /// Load records from a JSON file.
    ///
    /// # Errors
    /// Returns `UtilsError::Io` if the file cannot be read, or
    /// `UtilsError::Json` if it cannot be parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, UtilsError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    /// All symbols with a record.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.records.keys()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the provider holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl MetricsProvider for JsonMetricsProvider {
    fn try_fetch_metrics(&self, symbol: &Symbol) -> Result<MetricsRecord, ProviderError> {
        self.records.get(symbol).cloned().ok_or_else(|| ProviderError::NotFound(symbol.clone()))
    }
}

/// Peer provider over a fixed ticker-to-peers map.
#[derive(Debug, Clone, Default)]
pub struct StaticPeerProvider {
    peers: HashMap<Symbol, Vec<Symbol>>,
}

impl StaticPeerProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the peers of a ticker, replacing any previous list.
    #[must_use]
    pub fn with_peers<S: Into<Symbol>>(
        mut self,
        symbol: impl Into<Symbol>,
        peers: impl IntoIterator<Item = S>,
    ) -> Self {
        self.peers.insert(symbol.into(), peers.into_iter().map(Into::into).collect());
        self
    }

    /// Parse a JSON object mapping tickers to peer arrays.
    ///
    /// # Errors
    /// Returns `UtilsError::Json` if the input has another shape.
    pub fn from_json_str(json: &str) -> Result<Self, UtilsError> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        Ok(raw.into_iter().fold(Self::new(), |provider, (symbol, peers)| {
            provider.with_peers(symbol, peers)
        }))
    }

    /// Load a peer map from a JSON file.
    ///
    /// # Errors
    /// Returns `UtilsError::Io` if the file cannot be read, or
    /// `UtilsError::Json` if it cannot be parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, UtilsError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}

impl PeerProvider for StaticPeerProvider {
    fn suggest_peers(&self, symbol: &Symbol, count: usize) -> Result<Vec<Symbol>, ProviderError> {
        Ok(self
            .peers
            .get(symbol)
            .map(|peers| peers.iter().take(count).cloned().collect())
            .unwrap_or_default())
    }
}
