//! Rate comparison engine
//!
//! Turns a published KRW/USD rate and the two amounts of a real exchange into
//! the effective rate, the percentage delta against the published rate, and
//! the monetary impact in USD.
//!
//! # Example
//!
//! ```rust
//! use rate_gap::comparator::{compare, Direction};
//!
//! let result = compare(Some(135_000.0), Some(95.0), Some(1350.0)).unwrap();
//! assert!(result.delta_pct < 0.0);
//! assert_eq!(result.direction(), Direction::Gained);
//! assert!((result.impact_usd + 5.0).abs() < 1e-9);
//! ```

use crate::error::RateGapError;
use crate::types::{Amount, Percentage, Rate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parse a user-typed amount
///
/// Commas are grouping separators and are stripped before parsing. The
/// whole remaining text must be a number: trailing text such as `"100 USD"`
/// is rejected rather than read as a numeric prefix.
/// Returns `None` for empty, unparseable or non-finite text.
pub fn parse_amount(text: &str) -> Option<Amount> {
    let clean: String = text.trim().chars().filter(|c| *c != ',').collect();
    if clean.is_empty() {
        return None;
    }

    clean.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Why no comparison result can be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unavailable {
    /// Published rate not fetched yet, or the fetch failed
    NoPublishedRate,
    /// One or both amounts missing, non-positive or unparseable
    IncompleteInput,
}

impl Unavailable {
    /// Waiting message shown in place of a result
    pub fn placeholder(&self) -> &'static str {
        match self {
            Unavailable::NoPublishedRate => "Waiting for published rate...",
            Unavailable::IncompleteInput => "Waiting for both inputs...",
        }
    }
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.placeholder())
    }
}

impl From<Unavailable> for RateGapError {
    fn from(reason: Unavailable) -> Self {
        match reason {
            Unavailable::NoPublishedRate => RateGapError::NoPublishedRate,
            Unavailable::IncompleteInput => RateGapError::IncompleteInput(
                "both KRW and USD amounts must be positive numbers".to_string(),
            ),
        }
    }
}

/// Which way the difference against the published rate went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Fewer KRW per USD than published (delta >= 0)
    Lost,
    /// More KRW per USD than published (delta < 0)
    Gained,
}

impl Direction {
    pub fn from_delta(delta_pct: Percentage) -> Self {
        if delta_pct >= 0.0 {
            Direction::Lost
        } else {
            Direction::Gained
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            Direction::Lost => "Lost in exchange",
            Direction::Gained => "Gained in exchange",
        }
    }
}

/// Validated inputs for a comparison, all strictly positive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonInput {
    pub krw_amount: Amount,
    pub usd_amount: Amount,
    /// KRW per USD
    pub published_rate: Rate,
}

impl ComparisonInput {
    /// Validate raw values
    ///
    /// A missing or invalid published rate takes precedence over bad amounts.
    pub fn new(
        krw_amount: Option<Amount>,
        usd_amount: Option<Amount>,
        published_rate: Option<Rate>,
    ) -> std::result::Result<Self, Unavailable> {
        let published_rate = published_rate
            .filter(|r| is_positive(*r))
            .ok_or(Unavailable::NoPublishedRate)?;

        match (krw_amount, usd_amount) {
            (Some(krw), Some(usd)) if is_positive(krw) && is_positive(usd) => Ok(Self {
                krw_amount: krw,
                usd_amount: usd,
                published_rate,
            }),
            _ => Err(Unavailable::IncompleteInput),
        }
    }

    /// Validate amounts typed as text
    pub fn from_text(
        krw_text: &str,
        usd_text: &str,
        published_rate: Option<Rate>,
    ) -> std::result::Result<Self, Unavailable> {
        Self::new(parse_amount(krw_text), parse_amount(usd_text), published_rate)
    }

    /// Compute the derived values. No rounding is applied.
    pub fn evaluate(&self) -> ComparisonResult {
        let effective_rate = self.krw_amount / self.usd_amount;
        let delta_pct = (self.published_rate - effective_rate) / self.published_rate * 100.0;
        let implied_usd = self.krw_amount / self.published_rate;
        let impact_usd = self.usd_amount - implied_usd;

        ComparisonResult {
            krw_amount: self.krw_amount,
            usd_amount: self.usd_amount,
            published_rate: self.published_rate,
            effective_rate,
            delta_pct,
            implied_usd,
            impact_usd,
        }
    }
}

/// A computed comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub krw_amount: Amount,
    pub usd_amount: Amount,
    pub published_rate: Rate,
    /// krw_amount / usd_amount
    pub effective_rate: Rate,
    /// (published - effective) / published * 100
    pub delta_pct: Percentage,
    /// USD the KRW amount is worth at the published rate
    pub implied_usd: Amount,
    /// usd_amount - implied_usd; same sign as delta_pct
    pub impact_usd: Amount,
}

impl ComparisonResult {
    pub fn direction(&self) -> Direction {
        Direction::from_delta(self.delta_pct)
    }

    /// Whether every input and derived value is a finite number
    pub fn is_finite(&self) -> bool {
        [
            self.krw_amount,
            self.usd_amount,
            self.published_rate,
            self.effective_rate,
            self.delta_pct,
            self.implied_usd,
            self.impact_usd,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Either a result or the reason there is none
pub type Outcome = std::result::Result<ComparisonResult, Unavailable>;

/// Compare an exchange against the published rate
///
/// Pure and deterministic; cheap enough to call on every input change.
/// Amounts so extreme that a derived value overflows are treated as
/// incomplete input.
pub fn compare(
    krw_amount: Option<Amount>,
    usd_amount: Option<Amount>,
    published_rate: Option<Rate>,
) -> Outcome {
    let outcome = ComparisonInput::new(krw_amount, usd_amount, published_rate).and_then(|input| {
        let result = input.evaluate();
        if result.is_finite() {
            Ok(result)
        } else {
            log::warn!("Comparison overflowed for {:?}", input);
            Err(Unavailable::IncompleteInput)
        }
    });
    if let Ok(result) = &outcome {
        log::debug!(
            "Compared effective {} against published {}: delta {}%",
            result.effective_rate,
            result.published_rate,
            result.delta_pct
        );
    }
    outcome
}

/// Same as [`compare`] with amounts given as user-editable text
pub fn compare_text(krw_text: &str, usd_text: &str, published_rate: Option<Rate>) -> Outcome {
    compare(parse_amount(krw_text), parse_amount(usd_text), published_rate)
}
