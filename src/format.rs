//! Display formatting for comparison results and the published rate
//!
//! Rounding happens here and only here: rates and impact are shown with two
//! decimals and en-US digit grouping, the delta with two decimals and a `%`
//! suffix. Delta and impact are shown as absolute values next to a
//! "Lost"/"Gained" caption.

use crate::comparator::{Direction, Outcome};
use crate::rates::RateStatus;
use serde::Serialize;

/// Placeholder shown where a number would go
pub const PLACEHOLDER: &str = "--";

/// Format with a fixed number of decimals and comma grouping
///
/// ```
/// assert_eq!(rate_gap::format::format_grouped(1421.0526, 2), "1,421.05");
/// assert_eq!(rate_gap::format::format_grouped(-1234567.0, 0), "-1,234,567");
/// ```
pub fn format_grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    // sign only survives if a non-zero digit does
    let is_zero = grouped.chars().all(|c| matches!(c, '0' | ',' | '.'));
    if value < 0.0 && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}

/// KRW per USD, two decimals
pub fn format_rate(rate: f64) -> String {
    format_grouped(rate, 2)
}

/// Absolute delta with a percent suffix
pub fn format_delta(delta_pct: f64) -> String {
    format!("{}%", format_grouped(delta_pct.abs(), 2))
}

/// Absolute impact in USD
pub fn format_impact(impact_usd: f64) -> String {
    format!("{} USD", format_grouped(impact_usd.abs(), 2))
}

/// Text for the result panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonView {
    pub effective_rate: String,
    pub delta: String,
    pub caption: String,
    pub impact: String,
    pub direction: Option<Direction>,
}

impl ComparisonView {
    pub fn from_outcome(outcome: &Outcome) -> Self {
        match outcome {
            Ok(result) => {
                let direction = result.direction();
                Self {
                    effective_rate: format_rate(result.effective_rate),
                    delta: format_delta(result.delta_pct),
                    caption: direction.caption().to_string(),
                    impact: format_impact(result.impact_usd),
                    direction: Some(direction),
                }
            }
            Err(reason) => Self {
                effective_rate: PLACEHOLDER.to_string(),
                delta: PLACEHOLDER.to_string(),
                caption: reason.placeholder().to_string(),
                impact: PLACEHOLDER.to_string(),
                direction: None,
            },
        }
    }
}

/// Text for the published rate panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateView {
    pub rate: String,
    pub meta: String,
}

impl RateView {
    pub fn from_status(status: &RateStatus) -> Self {
        match status {
            RateStatus::Idle => Self {
                rate: PLACEHOLDER.to_string(),
                meta: String::new(),
            },
            RateStatus::Fetching => Self {
                rate: PLACEHOLDER.to_string(),
                meta: "Fetching latest rate...".to_string(),
            },
            RateStatus::Available(published) => Self {
                rate: format_rate(published.rate()),
                meta: format!("As of {}", published.as_of()),
            },
            RateStatus::Failed(_) => Self {
                rate: "Unavailable".to_string(),
                meta: "Check your connection and try again.".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::{compare, Unavailable};
    use crate::rates::PublishedRate;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0.0, 2), "0.00");
        assert_eq!(format_grouped(999.999, 2), "1,000.00");
        assert_eq!(format_grouped(1350.0, 2), "1,350.00");
        assert_eq!(format_grouped(123.456, 2), "123.46");
        assert_eq!(format_grouped(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(format_grouped(-0.001, 2), "0.00");
        assert_eq!(format_grouped(-5.0, 2), "-5.00");
        assert_eq!(format_grouped(f64::NAN, 2), PLACEHOLDER);
    }

    #[test]
    fn test_absolute_delta_and_impact() {
        assert_eq!(format_delta(-5.263157894736842), "5.26%");
        assert_eq!(format_delta(0.0), "0.00%");
        assert_eq!(format_impact(-5.0), "5.00 USD");
        assert_eq!(format_impact(1234.5), "1,234.50 USD");
    }

    #[test]
    fn test_view_for_result() {
        let view = ComparisonView::from_outcome(&compare(Some(135_000.0), Some(95.0), Some(1350.0)));
        assert_eq!(view.effective_rate, "1,421.05");
        assert_eq!(view.delta, "5.26%");
        assert_eq!(view.caption, "Gained in exchange");
        assert_eq!(view.impact, "5.00 USD");
        assert_eq!(view.direction, Some(Direction::Gained));
    }

    #[test]
    fn test_view_placeholders() {
        let view = ComparisonView::from_outcome(&Err(Unavailable::NoPublishedRate));
        assert_eq!(view.effective_rate, PLACEHOLDER);
        assert_eq!(view.caption, "Waiting for published rate...");

        let view = ComparisonView::from_outcome(&Err(Unavailable::IncompleteInput));
        assert_eq!(view.impact, PLACEHOLDER);
        assert_eq!(view.caption, "Waiting for both inputs...");
    }

    #[test]
    fn test_rate_view() {
        let published = PublishedRate::new(1350.0, "2024-01-02").unwrap();
        let view = RateView::from_status(&RateStatus::Available(published));
        assert_eq!(view.rate, "1,350.00");
        assert_eq!(view.meta, "As of 2024-01-02");

        let view = RateView::from_status(&RateStatus::Failed("timeout".to_string()));
        assert_eq!(view.rate, "Unavailable");

        let view = RateView::from_status(&RateStatus::Fetching);
        assert_eq!(view.meta, "Fetching latest rate...");
    }
}
