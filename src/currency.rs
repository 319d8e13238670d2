//! Currency types for the KRW/USD pair

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency enumeration (ISO 4217 codes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// US Dollar
    USD,
    /// South Korean Won
    KRW,
}

impl Currency {
    /// Get ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::KRW => "KRW",
        }
    }

}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Currency pair for exchange rates, quoted as units of `quote` per one `base`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    pub base: Currency,
    pub quote: Currency,
}

impl CurrencyPair {
    /// The only pair this crate compares: KRW per USD
    pub const USD_KRW: CurrencyPair = CurrencyPair {
        base: Currency::USD,
        quote: Currency::KRW,
    };
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code() {
        assert_eq!(Currency::USD.code(), "USD");
        assert_eq!(Currency::KRW.code(), "KRW");
    }

    #[test]
    fn test_currency_pair_display() {
        assert_eq!(CurrencyPair::USD_KRW.to_string(), "USD/KRW");
        assert_eq!(CurrencyPair::USD_KRW.base, Currency::USD);
        assert_eq!(CurrencyPair::USD_KRW.quote, Currency::KRW);
    }
}
