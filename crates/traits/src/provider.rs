//! Data provider trait definitions.

use std::sync::Arc;

use peerval_primitives::{MetricsRecord, Symbol};

/// Errors a data provider can report.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider has no data for the symbol.
    #[error("no data for symbol: {0}")]
    NotFound(Symbol),

    /// The upstream source could not be reached or answered badly.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The upstream source throttled the request.
    #[error("rate limited by provider")]
    RateLimited,
}

impl ProviderError {
    /// Returns whether a retry may succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::RateLimited)
    }
}

/// Source of per-ticker financial fields.
pub trait MetricsProvider: Send + Sync {
    /// Fetch the metrics for a symbol.
    ///
    /// # Errors
    /// Returns `ProviderError` if the provider cannot produce a record.
    fn try_fetch_metrics(&self, symbol: &Symbol) -> Result<MetricsRecord, ProviderError>;

    /// Fetch the metrics for a symbol, encoding any failure as a record with
    /// every field absent.
    fn fetch_metrics(&self, symbol: &Symbol) -> MetricsRecord {
        self.try_fetch_metrics(symbol).unwrap_or_else(|err| {
            tracing::warn!(%symbol, error = %err, "metrics unavailable");
            MetricsRecord::empty(symbol.clone())
        })
    }
}

/// Source of comparable tickers.
pub trait PeerProvider: Send + Sync {
    /// Suggest up to `count` peers for `symbol`, most relevant first.
    ///
    /// The list may be shorter than requested, or empty.
    ///
    /// # Errors
    /// Returns `ProviderError` if the provider cannot be queried.
    fn suggest_peers(&self, symbol: &Symbol, count: usize) -> Result<Vec<Symbol>, ProviderError>;
}

impl<T: MetricsProvider + ?Sized> MetricsProvider for Arc<T> {
    fn try_fetch_metrics(&self, symbol: &Symbol) -> Result<MetricsRecord, ProviderError> {
        (**self).try_fetch_metrics(symbol)
    }
}

impl<T: PeerProvider + ?Sized> PeerProvider for Arc<T> {
    fn suggest_peers(&self, symbol: &Symbol, count: usize) -> Result<Vec<Symbol>, ProviderError> {
        (**self).suggest_peers(symbol, count)
    }
}
