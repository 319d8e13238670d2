//! Comparison history
//!
//! A bounded, most-recent-first log of saved comparisons, persisted as a
//! single JSON blob in a [`KeyValueStore`](crate::storage::KeyValueStore).

pub mod entry;
pub mod export;
pub mod store;

pub use entry::{generate_id, HistoryEntry};
pub use export::{export, export_csv, export_json, ExportFormat};
pub use store::{HistoryLog, HistoryStore};
