//! Error types for peer valuation.

use peerval_math::MathError;
use peerval_primitives::Symbol;
use peerval_traits::ProviderError;

/// Errors that can occur during a valuation request.
#[derive(Debug, thiserror::Error)]
pub enum ValuationError {
    /// The ticker has no usable market data at all.
    #[error("invalid ticker: {0} (no market data available)")]
    InvalidTicker(Symbol),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Math error.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Data provider error.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl ValuationError {
    /// Returns whether this error is recoverable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Provider(err) => err.is_recoverable(),
            _ => false,
        }
    }
}
