//! Integration tests for the comparison engine
//!
//! Worked scenarios plus property checks over random positive inputs

use approx::assert_relative_eq;
use proptest::prelude::*;
use rate_gap::comparator::{compare, compare_text, Direction, Unavailable};
use rate_gap::format::ComparisonView;

#[test]
fn test_scenario_equal_rates() {
    let result = compare(Some(135_000.0), Some(100.0), Some(1350.00)).unwrap();
    assert_eq!(result.effective_rate, 1350.0);
    assert_eq!(result.delta_pct, 0.0);
    assert_eq!(result.impact_usd, 0.0);

    let view = ComparisonView::from_outcome(&Ok(result));
    assert_eq!(view.effective_rate, "1,350.00");
    assert_eq!(view.delta, "0.00%");
    assert_eq!(view.impact, "0.00 USD");
}

#[test]
fn test_scenario_gained() {
    let result = compare(Some(135_000.0), Some(95.0), Some(1350.00)).unwrap();
    assert_relative_eq!(result.effective_rate, 1421.05, epsilon = 0.01);
    assert_relative_eq!(result.delta_pct, -5.26, epsilon = 0.01);
    assert_relative_eq!(result.impact_usd, -5.0, epsilon = 1e-9);
    assert_eq!(result.direction(), Direction::Gained);

    let view = ComparisonView::from_outcome(&Ok(result));
    assert_eq!(view.effective_rate, "1,421.05");
    assert_eq!(view.delta, "5.26%");
    assert_eq!(view.caption, "Gained in exchange");
    assert_eq!(view.impact, "5.00 USD");
}

#[test]
fn test_scenario_no_published_rate() {
    assert_eq!(
        compare(Some(1000.0), Some(1.0), None),
        Err(Unavailable::NoPublishedRate)
    );
    assert_eq!(
        compare_text("1000", "1", None),
        Err(Unavailable::NoPublishedRate)
    );
}

#[test]
fn test_scenario_zero_krw() {
    assert_eq!(
        compare(Some(0.0), Some(100.0), Some(1350.0)),
        Err(Unavailable::IncompleteInput)
    );
    assert_eq!(
        compare_text("0", "100", Some(1350.0)),
        Err(Unavailable::IncompleteInput)
    );
}

#[test]
fn test_grouped_text_input() {
    let result = compare_text("1,421,052.63", "1,000", Some(1350.0)).unwrap();
    assert_relative_eq!(result.effective_rate, 1421.05263, epsilon = 1e-9);
}

fn positive() -> impl Strategy<Value = f64> {
    1e-3f64..1e9f64
}

proptest! {
    #[test]
    fn prop_definitions_hold_exactly(krw in positive(), usd in positive(), rate in positive()) {
        let result = compare(Some(krw), Some(usd), Some(rate)).unwrap();
        let effective = krw / usd;
        prop_assert_eq!(result.effective_rate, effective);
        prop_assert_eq!(result.delta_pct, (rate - effective) / rate * 100.0);
        prop_assert_eq!(result.impact_usd, usd - krw / rate);
        prop_assert_eq!(result.delta_pct == 0.0, result.effective_rate == rate);
    }

    #[test]
    fn prop_delta_and_impact_share_sign(krw in positive(), usd in positive(), rate in positive()) {
        let result = compare(Some(krw), Some(usd), Some(rate)).unwrap();
        // Rounding can only disagree when the true difference is below float resolution
        if result.delta_pct.abs() > 1e-6 {
            prop_assert_eq!(result.delta_pct >= 0.0, result.impact_usd >= 0.0);
        }
    }

    #[test]
    fn prop_compare_is_idempotent(krw in positive(), usd in positive(), rate in positive()) {
        let first = compare(Some(krw), Some(usd), Some(rate)).unwrap();
        let second = compare(Some(krw), Some(usd), Some(rate)).unwrap();
        prop_assert_eq!(first.effective_rate.to_bits(), second.effective_rate.to_bits());
        prop_assert_eq!(first.delta_pct.to_bits(), second.delta_pct.to_bits());
        prop_assert_eq!(first.impact_usd.to_bits(), second.impact_usd.to_bits());
    }

    #[test]
    fn prop_missing_rate_always_wins(krw in proptest::option::of(-1e6f64..1e6), usd in proptest::option::of(-1e6f64..1e6)) {
        prop_assert_eq!(compare(krw, usd, None), Err(Unavailable::NoPublishedRate));
    }
}
