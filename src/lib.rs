//! # rate_gap
//!
//! Compare a KRW/USD exchange you actually made against the officially
//! published market rate.
//!
//! Given the published rate (KRW per USD) and the two amounts of a real
//! exchange, [`comparator::compare`] computes the effective rate, the
//! percentage delta against the published rate and the monetary impact in
//! USD. Results can be kept in a bounded, persisted [`history`] log.
//!
//! ## Example
//!
//! ```rust
//! use rate_gap::prelude::*;
//!
//! let result = compare_text("135,000", "100", Some(1350.0)).unwrap();
//! assert_eq!(result.effective_rate, 1350.0);
//! assert_eq!(result.delta_pct, 0.0);
//!
//! let mut history = HistoryStore::new(MemoryStore::new());
//! history.append(&result, "2024-01-02").unwrap();
//! assert_eq!(history.list().len(), 1);
//! ```

pub mod comparator;
#[cfg(feature = "cli")]
pub mod config;
pub mod currency;
pub mod error;
pub mod format;
pub mod history;
pub mod rates;
pub mod session;
pub mod storage;
pub mod types;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::comparator::{
        compare, compare_text, parse_amount, ComparisonInput, ComparisonResult, Direction,
        Outcome, Unavailable,
    };
    pub use crate::error::{RateGapError, Result};
    pub use crate::format::{ComparisonView, RateView};
    pub use crate::history::{HistoryEntry, HistoryLog, HistoryStore};
    pub use crate::rates::{PublishedRate, RateSource, RateStatus};
    pub use crate::session::{FetchTicket, Session};
    pub use crate::storage::{FileStore, KeyValueStore, MemoryStore};
    pub use crate::types::*;
}
