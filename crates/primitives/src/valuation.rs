//! Valuation component and result type definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::{MetricsRecord, PeerMetric, PeerStatistics, Symbol, Timestamp};

/// A peer-multiple valuation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValuationMethod {
    /// Earnings per share times peer median P/E.
    #[serde(rename = "pe_valuation")]
    PriceToEarnings,
    /// Book value per share times peer median P/B.
    #[serde(rename = "pb_valuation")]
    PriceToBook,
    /// Revenue per share times peer median P/S.
    #[serde(rename = "ps_valuation")]
    PriceToSales,
}

impl ValuationMethod {
    /// Every method, in evaluation order.
    pub const ALL: [Self; 3] = [Self::PriceToEarnings, Self::PriceToBook, Self::PriceToSales];

    /// Component name of the method.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PriceToEarnings => "pe_valuation",
            Self::PriceToBook => "pb_valuation",
            Self::PriceToSales => "ps_valuation",
        }
    }

    /// The peer multiple this method relies on.
    #[must_use]
    pub const fn multiple(&self) -> PeerMetric {
        match self {
            Self::PriceToEarnings => PeerMetric::PeRatio,
            Self::PriceToBook => PeerMetric::PbRatio,
            Self::PriceToSales => PeerMetric::PsRatio,
        }
    }

    /// Band the peer median multiple must fall in for the method to fire.
    #[must_use]
    pub const fn median_band(&self) -> (f64, f64) {
        match self {
            Self::PriceToEarnings => (5.0, 100.0),
            Self::PriceToBook => (0.1, 20.0),
            Self::PriceToSales => (0.1, 30.0),
        }
    }
}

impl std::fmt::Display for ValuationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Price derived from a single valuation method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationComponent {
    /// Per-share figure times peer median, before adjustment.
    pub base_price: f64,
    /// Quality multiplier applied to the base price.
    pub quality_multiplier: f64,
    /// Price after quality adjustment and sanity capping.
    pub final_price: f64,
    /// Peer median multiple used.
    pub peer_median_multiple: f64,
    /// Target per-share figure used.
    pub target_metric_value: f64,
    /// Confidence score in [0, 100].
    pub confidence: u8,
    /// Whether a sanity cap changed the adjusted price.
    pub sanity_check_applied: bool,
}

/// Fired valuation components keyed by method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValuationComponents(BTreeMap<ValuationMethod, ValuationComponent>);

impl ValuationComponents {
    /// Create an empty component map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a component.
    pub fn insert(&mut self, method: ValuationMethod, component: ValuationComponent) {
        self.0.insert(method, component);
    }

    /// Get the component for a method.
    #[must_use]
    pub fn get(&self, method: ValuationMethod) -> Option<&ValuationComponent> {
        self.0.get(&method)
    }

    /// Iterate components in method order.
    pub fn iter(&self) -> impl Iterator<Item = (ValuationMethod, &ValuationComponent)> {
        self.0.iter().map(|(m, c)| (*m, c))
    }

    /// Fired methods in order.
    pub fn methods(&self) -> impl Iterator<Item = ValuationMethod> + '_ {
        self.0.keys().copied()
    }

    /// Number of fired methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ValuationMethod, ValuationComponent)> for ValuationComponents {
    fn from_iter<I: IntoIterator<Item = (ValuationMethod, ValuationComponent)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Label describing how the final price was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodLabel {
    /// A single method fired.
    Single(ValuationMethod),
    /// Several methods were blended.
    Composite,
    /// No method fired.
    InsufficientData,
}

impl std::fmt::Display for MethodLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(method) => write!(f, "{}", method.name().to_uppercase()),
            Self::Composite => write!(f, "COMPOSITE"),
            Self::InsufficientData => write!(f, "INSUFFICIENT_DATA"),
        }
    }
}

impl Serialize for MethodLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Complete outcome of one valuation request.
#[derive(Debug, Clone, Serialize)]
pub struct ValuationResult {
    /// Target ticker.
    pub symbol: Symbol,
    /// When the valuation was computed.
    pub timestamp: Timestamp,
    /// Target's current market price.
    pub current_price: Option<f64>,
    /// Composite fair value after the final guard.
    pub fair_value: Option<f64>,
    /// Fair value minus current price.
    pub difference: Option<f64>,
    /// Difference as a percentage of the current price.
    pub difference_pct: Option<f64>,
    /// How the fair value was obtained.
    pub method: MethodLabel,
    /// Target's own metrics.
    pub target_metrics: MetricsRecord,
    /// Peers with a resolvable market cap.
    pub peers_used: Vec<Symbol>,
    /// Number of usable peers.
    pub peer_count: usize,
    /// Statistics over the usable peers.
    pub peer_statistics: PeerStatistics,
    /// Fired valuation components.
    pub components: ValuationComponents,
    /// Ordered explanations.
    pub insights: Vec<String>,
}

impl ValuationResult {
    /// Print a concise summary of the valuation.
    pub fn print_summary(&self) {
        println!(
            "\n================================================================================"
        );
        println!("PEER VALUATION: {}", self.symbol);
        println!(
            "================================================================================"
        );
        println!("As of: {}", self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
        println!("Method: {}", self.method);
        println!("Peers used ({}): {}", self.peer_count, join_symbols(&self.peers_used));
        println!(
            "--------------------------------------------------------------------------------"
        );
        println!("\nCOMPONENTS:");
        println!(
            "{:<16} {:>10} {:>10} {:>10} {:>10} {:>8}",
            "Method", "Median", "Base", "Quality", "Final", "Conf"
        );
        println!("{:-<16} {:-^10} {:-^10} {:-^10} {:-^10} {:-^8}", "", "", "", "", "", "");
        for (method, c) in self.components.iter() {
            let capped = if c.sanity_check_applied { "*" } else { "" };
            println!(
                "{:<16} {:>10.2} {:>10.2} {:>10.3} {:>9.2}{:1} {:>8}",
                method.name(),
                c.peer_median_multiple,
                c.base_price,
                c.quality_multiplier,
                c.final_price,
                capped,
                c.confidence
            );
        }

        println!(
            "\n--------------------------------------------------------------------------------"
        );
        println!("SUMMARY:");
        println!("  Current Price: {}", fmt_price(self.current_price));
        println!("  Fair Value:    {}", fmt_price(self.fair_value));
        if let Some(pct) = self.difference_pct {
            println!("  Difference:    {pct:>+8.2}%");
        }
        println!("\nINSIGHTS:");
        for insight in &self.insights {
            println!("  - {insight}");
        }
        println!(
            "================================================================================\n"
        );
    }
}

fn fmt_price(price: Option<f64>) -> String {
    price.map_or_else(|| "n/a".to_string(), |p| format!("{p:>10.2}"))
}

fn join_symbols(symbols: &[Symbol]) -> String {
    symbols.iter().map(Symbol::as_str).collect::<Vec<_>>().join(", ")
}
