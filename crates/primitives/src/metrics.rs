//! Per-ticker financial metrics.

use serde::{Deserialize, Serialize};

use crate::{PeerMetric, Symbol, ValuationMethod};

/// Financial fields reported for a single ticker.
///
/// Every field is independently optional: `None` means the data provider did
/// not report the value, never zero. Non-finite values are treated as absent
/// by the accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Market capitalization.
    #[serde(default)]
    pub market_cap: Option<f64>,
    /// Price to earnings ratio.
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    /// Price to book ratio.
    #[serde(default)]
    pub pb_ratio: Option<f64>,
    /// Price to sales ratio.
    #[serde(default)]
    pub ps_ratio: Option<f64>,
    /// Latest market price.
    #[serde(default)]
    pub current_price: Option<f64>,
    /// Book value per share.
    #[serde(default)]
    pub book_value_per_share: Option<f64>,
    /// Revenue per share.
    #[serde(default)]
    pub revenue_per_share: Option<f64>,
    /// Earnings per share.
    #[serde(default)]
    pub earnings_per_share: Option<f64>,
    /// Return on equity, as a fraction.
    #[serde(default)]
    pub return_on_equity: Option<f64>,
    /// Debt to equity ratio.
    #[serde(default)]
    pub debt_to_equity: Option<f64>,
    /// Profit margin, as a fraction.
    #[serde(default)]
    pub profit_margin: Option<f64>,
    /// Year over year revenue growth, as a fraction.
    #[serde(default)]
    pub revenue_growth: Option<f64>,
}

impl MetricsRecord {
    /// A record with every field absent.
    #[must_use]
    pub fn empty(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            market_cap: None,
            pe_ratio: None,
            pb_ratio: None,
            ps_ratio: None,
            current_price: None,
            book_value_per_share: None,
            revenue_per_share: None,
            earnings_per_share: None,
            return_on_equity: None,
            debt_to_equity: None,
            profit_margin: None,
            revenue_growth: None,
        }
    }

    /// Copy of this record with the current price replaced.
    #[must_use]
    pub fn with_current_price(self, price: Option<f64>) -> Self {
        Self { current_price: price, ..self }
    }

    /// Value of a tracked peer metric, if reported and finite.
    #[must_use]
    pub fn metric(&self, metric: PeerMetric) -> Option<f64> {
        let value = match metric {
            PeerMetric::PeRatio => self.pe_ratio,
            PeerMetric::PbRatio => self.pb_ratio,
            PeerMetric::PsRatio => self.ps_ratio,
            PeerMetric::ReturnOnEquity => self.return_on_equity,
            PeerMetric::DebtToEquity => self.debt_to_equity,
        };
        value.filter(|v| v.is_finite())
    }

    /// Per-share figure a valuation method multiplies by the peer median.
    #[must_use]
    pub fn per_share(&self, method: ValuationMethod) -> Option<f64> {
        let value = match method {
            ValuationMethod::PriceToEarnings => self.earnings_per_share,
            ValuationMethod::PriceToBook => self.book_value_per_share,
            ValuationMethod::PriceToSales => self.revenue_per_share,
        };
        value.filter(|v| v.is_finite())
    }

    /// Current price, if reported, finite and positive.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        self.current_price.filter(|p| p.is_finite() && *p > 0.0)
    }

    /// Market cap, if reported, finite and positive.
    #[must_use]
    pub fn resolved_market_cap(&self) -> Option<f64> {
        self.market_cap.filter(|m| m.is_finite() && *m > 0.0)
    }

    /// Whether the record carries any usable market data.
    #[must_use]
    pub fn has_market_data(&self) -> bool {
        self.resolved_market_cap().is_some() || self.price().is_some()
    }
}
