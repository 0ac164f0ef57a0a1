//! Per-method price derivation.

use peerval_primitives::{MetricsRecord, PeerStatistics, ValuationComponent, ValuationMethod};
use tracing::debug;

use crate::SanityConfig;

/// Confidence points earned per cleaned peer sample, saturating at 100.
const CONFIDENCE_PER_SAMPLE: usize = 20;

/// Clamp a price to the relative and absolute sanity bands.
///
/// Returns the bounded price and whether the bounds changed it.
#[must_use]
pub fn sanity_check(price: f64, current_price: Option<f64>, config: &SanityConfig) -> (f64, bool) {
    let mut bounded = price;
    if let Some(current) = current_price.filter(|c| c.is_finite() && *c > 0.0) {
        bounded = bounded.clamp(current * config.min_ratio, current * config.max_ratio);
    }
    bounded = bounded.clamp(config.floor, config.ceiling);
    (bounded, bounded != price)
}

/// Confidence score for a peer sample count.
#[must_use]
pub fn confidence_for(count: usize) -> u8 {
    // Bounded by the `min`, so the cast cannot truncate.
    count.saturating_mul(CONFIDENCE_PER_SAMPLE).min(100) as u8
}

/// Derive the component for one method, if it can fire.
///
/// A method fires when the target's per-share figure is positive, the peer
/// multiple has at least two samples and the peer median is plausible.
#[must_use]
pub fn value_method(
    method: ValuationMethod,
    target: &MetricsRecord,
    stats: &PeerStatistics,
    quality_multiplier: f64,
    sanity: &SanityConfig,
) -> Option<ValuationComponent> {
    let per_share = target.per_share(method).filter(|v| *v > 0.0)?;
    let entry = stats.get(method.multiple()).filter(|e| e.count >= 2)?;

    let (lower, upper) = method.median_band();
    if !(lower..=upper).contains(&entry.median) {
        debug!(%method, median = entry.median, "peer median outside plausible band");
        return None;
    }

    let base_price = per_share * entry.median;
    let adjusted = base_price * quality_multiplier;
    let (final_price, sanity_check_applied) = sanity_check(adjusted, target.price(), sanity);
    if sanity_check_applied {
        debug!(%method, adjusted, final_price, "sanity cap applied");
    }

    Some(ValuationComponent {
        base_price,
        quality_multiplier,
        final_price,
        peer_median_multiple: entry.median,
        target_metric_value: per_share,
        confidence: confidence_for(entry.count),
        sanity_check_applied,
    })
}
