//! Human-readable explanations of a valuation.

use peerval_primitives::{MetricsRecord, PeerMetric, PeerStatistics, ValuationComponents};

/// Insight emitted when no method fired.
pub const INSUFFICIENT_DATA: &str = "Insufficient data for peer-based valuation";

const PREMIUM_THRESHOLD: f64 = 1.05;
const DISCOUNT_THRESHOLD: f64 = 0.95;
const STRONG_ROE: f64 = 1.2;
const WEAK_ROE: f64 = 0.8;
const CONSERVATIVE_LEVERAGE: f64 = 0.7;
const HIGH_LEVERAGE: f64 = 1.5;
const MISPRICING_PCT: f64 = 10.0;
const HIGH_CONFIDENCE: u8 = 80;
const LOW_CONFIDENCE: u8 = 60;

/// Explain a valuation as an ordered list of sentences.
///
/// Rules run in a fixed order and each is gated independently, so the output
/// is deterministic for a given input.
#[must_use]
pub fn explain(
    target: &MetricsRecord,
    components: &ValuationComponents,
    current_price: Option<f64>,
    composite_price: Option<f64>,
    stats: &PeerStatistics,
) -> Vec<String> {
    if components.is_empty() {
        return vec![INSUFFICIENT_DATA.to_string()];
    }

    let mut insights = Vec::new();

    let labels: Vec<&str> = components.methods().map(|m| m.multiple().label()).collect();
    insights.push(format!("Valuation based on {} peer multiples", labels.join(", ")));

    if let Some((_, c)) = components.iter().next() {
        insights.push(describe_quality(c.quality_multiplier));
    }

    let capped: Vec<&str> = components
        .iter()
        .filter(|(_, c)| c.sanity_check_applied)
        .map(|(m, _)| m.multiple().label())
        .collect();
    if !capped.is_empty() {
        insights.push(format!(
            "Extreme valuations were capped by sanity checks ({})",
            capped.join(", ")
        ));
    }

    let outliers = stats.multiple_outliers();
    if !outliers.is_empty() {
        let counts: Vec<String> =
            outliers.iter().map(|(m, n)| format!("{}: {n}", m.label())).collect();
        insights.push(format!("Removed outliers from peer data ({})", counts.join(", ")));
    }

    if let Some(line) = compare_roe(target, stats) {
        insights.push(line);
    }
    if let Some(line) = compare_leverage(target, stats) {
        insights.push(line);
    }

    if let (Some(current), Some(computed)) = (current_price, composite_price) {
        if current > 0.0 {
            insights.push(describe_mispricing((computed - current) / current * 100.0));
        }
    }

    for (method, c) in components.iter() {
        let label = method.multiple().label();
        if c.confidence >= HIGH_CONFIDENCE {
            insights.push(format!(
                "High confidence in {label} valuation (confidence {})",
                c.confidence
            ));
        } else if c.confidence < LOW_CONFIDENCE {
            insights.push(format!(
                "Lower confidence in {label} valuation due to limited peer data (confidence {})",
                c.confidence
            ));
        }
    }

    insights
}

fn describe_quality(multiplier: f64) -> String {
    if multiplier > PREMIUM_THRESHOLD {
        format!(
            "Quality premium of {:.1}% applied for stronger ROE and leverage than peers",
            (multiplier - 1.0) * 100.0
        )
    } else if multiplier < DISCOUNT_THRESHOLD {
        format!(
            "Quality discount of {:.1}% applied for weaker ROE and leverage than peers",
            (1.0 - multiplier) * 100.0
        )
    } else {
        format!(
            "Quality metrics in line with peers (adjustment {:+.1}%)",
            (multiplier - 1.0) * 100.0
        )
    }
}

fn compare_roe(target: &MetricsRecord, stats: &PeerStatistics) -> Option<String> {
    let roe = target.metric(PeerMetric::ReturnOnEquity)?;
    let median = stats.get(PeerMetric::ReturnOnEquity)?.median;

    if roe > median * STRONG_ROE {
        Some(format!(
            "Strong ROE of {:.1}% vs peer median {:.1}%",
            roe * 100.0,
            median * 100.0
        ))
    } else if roe < median * WEAK_ROE {
        Some(format!(
            "Below-average ROE of {:.1}% vs peer median {:.1}%",
            roe * 100.0,
            median * 100.0
        ))
    } else {
        None
    }
}

fn compare_leverage(target: &MetricsRecord, stats: &PeerStatistics) -> Option<String> {
    let de = target.metric(PeerMetric::DebtToEquity)?;
    let median = stats.get(PeerMetric::DebtToEquity)?.median;

    if de < median * CONSERVATIVE_LEVERAGE {
        Some(format!("Conservative leverage: D/E of {de:.2} vs peer median {median:.2}"))
    } else if de > median * HIGH_LEVERAGE {
        Some(format!("High leverage: D/E of {de:.2} vs peer median {median:.2}"))
    } else {
        None
    }
}

fn describe_mispricing(pct: f64) -> String {
    if pct > MISPRICING_PCT {
        format!("Stock appears undervalued by {pct:.1}% relative to peers")
    } else if pct < -MISPRICING_PCT {
        format!("Stock appears overvalued by {:.1}% relative to peers", pct.abs())
    } else {
        format!("Stock appears fairly valued relative to peers ({pct:+.1}%)")
    }
}
