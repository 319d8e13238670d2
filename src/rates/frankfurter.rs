//! Frankfurter API rate source
//!
//! Provides the latest USD to KRW reference rate. No API key required.

use super::PublishedRate;
use crate::currency::Currency;
use crate::error::{RateGapError, Result};
use serde::Deserialize;
use std::collections::HashMap;

#[cfg(feature = "async")]
use super::RateSource;
#[cfg(feature = "async")]
use crate::types::DEFAULT_RATE_URL;
#[cfg(feature = "async")]
use reqwest::Client;
#[cfg(feature = "async")]
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct LatestResponse {
    date: Option<String>,
    #[serde(default)]
    rates: HashMap<String, f64>,
}

/// Parse a `/latest?base=USD&symbols=KRW` payload
pub fn parse_latest(body: &str) -> Result<PublishedRate> {
    let response: LatestResponse = serde_json::from_str(body)
        .map_err(|e| RateGapError::RateUnavailable(format!("Malformed payload: {}", e)))?;

    let rate = response
        .rates
        .get(Currency::KRW.code())
        .copied()
        .ok_or_else(|| RateGapError::RateUnavailable("Rate missing".to_string()))?;

    PublishedRate::new(rate, response.date.unwrap_or_default())
}

/// Frankfurter rate source
#[cfg(feature = "async")]
pub struct FrankfurterSource {
    client: Client,
    url: String,
}

#[cfg(feature = "async")]
impl FrankfurterSource {
    /// Create a source against the public endpoint
    pub fn new() -> Result<Self> {
        Self::with_url(DEFAULT_RATE_URL, Duration::from_secs(30))
    }

    /// Create a source against a custom endpoint
    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                RateGapError::RateUnavailable(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_latest(&self) -> Result<PublishedRate> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| RateGapError::RateUnavailable(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(RateGapError::RateUnavailable(format!(
                "Frankfurter returned error: {}",
                response.status()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| RateGapError::RateUnavailable(format!("Failed to read response: {}", e)))?;

        parse_latest(&text)
    }
}

#[cfg(feature = "async")]
impl RateSource for FrankfurterSource {
    fn fetch(&self) -> impl std::future::Future<Output = Result<PublishedRate>> + Send {
        self.fetch_latest()
    }

    fn name(&self) -> &str {
        "frankfurter"
    }
}
