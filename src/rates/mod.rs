//! Published rate collaborator
//!
//! The comparison engine only needs a positive KRW-per-USD rate and a label
//! for the date it applies to. Where that comes from is behind [`RateSource`]:
//! - [`FrankfurterSource`]: the public Frankfurter API (requires `async`)
//! - [`FixedRateSource`]: a canned answer for tests and manual overrides
//!
//! Any failure (network, HTTP status, malformed payload, missing or
//! non-positive rate) is reported uniformly as
//! [`RateGapError::RateUnavailable`].

pub mod frankfurter;

#[cfg(feature = "async")]
pub use frankfurter::FrankfurterSource;
pub use frankfurter::parse_latest;

use crate::error::{RateGapError, Result};
use crate::types::Rate;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// A published KRW-per-USD rate and the date label it is effective for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedRate {
    rate: Rate,
    as_of: String,
}

impl PublishedRate {
    /// Create a published rate, rejecting non-finite or non-positive values
    pub fn new(rate: Rate, as_of: impl Into<String>) -> Result<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(RateGapError::RateUnavailable(format!(
                "rate must be a positive number, got: {}",
                rate
            )));
        }

        Ok(Self {
            rate,
            as_of: as_of.into(),
        })
    }

    pub fn rate(&self) -> Rate {
        self.rate
    }

    pub fn as_of(&self) -> &str {
        &self.as_of
    }
}

/// Lifecycle of the published rate within a session
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RateStatus {
    /// No fetch requested yet
    #[default]
    Idle,
    /// A fetch is outstanding; the rate is treated as unset
    Fetching,
    /// Latest fetch succeeded
    Available(PublishedRate),
    /// Latest fetch failed
    Failed(String),
}

impl RateStatus {
    /// The usable published rate, if any
    pub fn published(&self) -> Option<&PublishedRate> {
        match self {
            RateStatus::Available(published) => Some(published),
            _ => None,
        }
    }

    pub fn rate(&self) -> Option<Rate> {
        self.published().map(PublishedRate::rate)
    }
}

/// Trait for published rate sources
pub trait RateSource: Send + Sync {
    /// Fetch the latest published rate. Single shot, no retries.
    fn fetch(&self) -> impl Future<Output = Result<PublishedRate>> + Send;

    /// Get the source name
    fn name(&self) -> &str;
}

/// Rate source returning a fixed answer
#[derive(Debug, Clone)]
pub struct FixedRateSource {
    answer: std::result::Result<PublishedRate, String>,
}

impl FixedRateSource {
    /// Always answer with this rate
    pub fn new(rate: Rate, as_of: impl Into<String>) -> Result<Self> {
        Ok(Self {
            answer: Ok(PublishedRate::new(rate, as_of)?),
        })
    }

    /// Always fail with this reason
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            answer: Err(reason.into()),
        }
    }
}

impl RateSource for FixedRateSource {
    fn fetch(&self) -> impl Future<Output = Result<PublishedRate>> + Send {
        let answer = self.answer.clone().map_err(RateGapError::RateUnavailable);
        async move { answer }
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
