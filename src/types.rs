//! Core types and constants

use chrono::{DateTime, Utc};

/// Timestamp type used throughout the library
pub type Timestamp = DateTime<Utc>;

/// Exchange rate quoted as KRW per USD
pub type Rate = f64;

/// Monetary amount in a single currency
pub type Amount = f64;

/// Signed percentage (5.0 means 5%)
pub type Percentage = f64;

/// Unique identifier for history entries
pub type EntryId = String;

/// Maximum number of entries kept in the history log
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// Storage key the history log is persisted under
pub const HISTORY_KEY: &str = "rate-gap.history";

/// Default endpoint for the latest USD to KRW rate
pub const DEFAULT_RATE_URL: &str = "https://api.frankfurter.dev/v1/latest?base=USD&symbols=KRW";
