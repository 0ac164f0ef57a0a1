//! Composite price blending.

use peerval_math::round_to;
use peerval_primitives::{MethodLabel, ValuationComponents};

/// Blended price and how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blend {
    /// Blended price, absent when no method fired.
    pub price: Option<f64>,
    /// Method label.
    pub method: MethodLabel,
}

/// Blend fired components into one price.
///
/// A single component is used as is. Several are averaged with weights
/// `confidence / 100` and rounded to cents; a zero total weight falls back to
/// the plain mean.
#[must_use]
pub fn blend(components: &ValuationComponents) -> Blend {
    let mut iter = components.iter();
    match (iter.next(), iter.next()) {
        (None, _) => Blend { price: None, method: MethodLabel::InsufficientData },
        (Some((method, c)), None) => {
            Blend { price: Some(c.final_price), method: MethodLabel::Single(method) }
        }
        _ => {
            let price = round_to(weighted_mean(components), 2);
            Blend { price: Some(price), method: MethodLabel::Composite }
        }
    }
}

fn weighted_mean(components: &ValuationComponents) -> f64 {
    let (weighted_sum, total_weight) =
        components.iter().fold((0.0, 0.0), |(sum, weight), (_, c)| {
            let w = f64::from(c.confidence) / 100.0;
            (sum + c.final_price * w, weight + w)
        });

    if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        components.iter().map(|(_, c)| c.final_price).sum::<f64>() / components.len() as f64
    }
}

/// Bound a composite price to `[0, guard_multiple * current]`.
///
/// Without a usable current price only the lower bound applies.
#[must_use]
pub fn guard_price(price: f64, current_price: Option<f64>, guard_multiple: f64) -> f64 {
    let bounded = match current_price.filter(|c| c.is_finite() && *c > 0.0) {
        Some(current) => price.min(current * guard_multiple),
        None => price,
    };
    bounded.max(0.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use peerval_primitives::{ValuationComponent, ValuationMethod};
    use rstest::rstest;

    use super::*;

    fn component(final_price: f64, confidence: u8) -> ValuationComponent {
        ValuationComponent {
            base_price: final_price,
            quality_multiplier: 1.0,
            final_price,
            peer_median_multiple: 10.0,
            target_metric_value: final_price / 10.0,
            confidence,
            sanity_check_applied: false,
        }
    }

    #[test]
    fn empty_is_insufficient_data() {
        let blend = blend(&ValuationComponents::new());
        assert_eq!(blend.price, None);
        assert_eq!(blend.method, MethodLabel::InsufficientData);
    }

    #[test]
    fn single_component_keeps_its_name() {
        let components: ValuationComponents =
            [(ValuationMethod::PriceToSales, component(33.333, 40))].into_iter().collect();
        let blend = blend(&components);
        assert_eq!(blend.method, MethodLabel::Single(ValuationMethod::PriceToSales));
        assert_eq!(blend.method.to_string(), "PS_VALUATION");
        assert_relative_eq!(blend.price.unwrap(), 33.333);
    }

    #[test]
    fn confidence_weighted_average() {
        let components: ValuationComponents = [
            (ValuationMethod::PriceToEarnings, component(100.0, 100)),
            (ValuationMethod::PriceToBook, component(40.0, 40)),
            (ValuationMethod::PriceToSales, component(61.0, 60)),
        ]
        .into_iter()
        .collect();
        // (100 + 16 + 36.6) / 2.0 = 76.3
        let blend = blend(&components);
        assert_eq!(blend.method, MethodLabel::Composite);
        assert_relative_eq!(blend.price.unwrap(), 76.3, epsilon = 1e-9);
    }

    #[test]
    fn zero_weights_fall_back_to_mean() {
        let components: ValuationComponents = [
            (ValuationMethod::PriceToEarnings, component(10.0, 0)),
            (ValuationMethod::PriceToBook, component(20.0, 0)),
        ]
        .into_iter()
        .collect();
        assert_relative_eq!(blend(&components).price.unwrap(), 15.0);
    }

    #[test]
    fn composite_is_rounded_to_cents() {
        let components: ValuationComponents = [
            (ValuationMethod::PriceToEarnings, component(10.0, 60)),
            (ValuationMethod::PriceToBook, component(10.005, 60)),
            (ValuationMethod::PriceToSales, component(10.011, 60)),
        ]
        .into_iter()
        .collect();
        assert_relative_eq!(blend(&components).price.unwrap(), 10.01, epsilon = 1e-12);
    }

    #[rstest]
    #[case(150.0, Some(50.0), 100.0)]
    #[case(80.0, Some(50.0), 80.0)]
    #[case(-5.0, Some(50.0), 0.0)]
    #[case(150.0, None, 150.0)]
    #[case(-5.0, None, 0.0)]
    fn guard_bounds(#[case] price: f64, #[case] current: Option<f64>, #[case] expected: f64) {
        assert_relative_eq!(guard_price(price, current, 2.0), expected);
    }
}
