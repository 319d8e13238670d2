//! Persisted, bounded history log
//!
//! The log is the sole source of truth: every operation reads it from the
//! backing [`KeyValueStore`] and every mutation writes the full log back
//! before returning, so `list()` right after a mutation always reflects it.

use super::entry::{generate_id, HistoryEntry};
use crate::comparator::ComparisonResult;
use crate::error::{RateGapError, Result};
use crate::storage::KeyValueStore;
use crate::types::{Timestamp, HISTORY_KEY, MAX_HISTORY_ENTRIES};
use chrono::Utc;

/// Saved comparisons, most recent first
pub type HistoryLog = Vec<HistoryEntry>;

/// Manages the history log in a key-value store
pub struct HistoryStore<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Create a store keeping up to 50 entries under the default key
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: HISTORY_KEY.to_string(),
        }
    }

    /// Persist under a different key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Access the backing store
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Read the log strictly
    ///
    /// Absent storage is an empty log; unreadable or undecodable storage is
    /// [`RateGapError::PersistenceCorrupt`].
    pub fn load(&self) -> Result<HistoryLog> {
        let raw = self
            .store
            .get(&self.key)
            .map_err(|e| RateGapError::PersistenceCorrupt(e.to_string()))?;

        match raw {
            None => Ok(Vec::new()),
            Some(text) if text.trim().is_empty() => Ok(Vec::new()),
            Some(text) => serde_json::from_str(&text)
                .map_err(|e| RateGapError::PersistenceCorrupt(e.to_string())),
        }
    }

    /// Read the log, treating corrupt storage as empty
    pub fn list(&self) -> HistoryLog {
        match self.load() {
            Ok(entries) => {
                log::debug!("Loaded {} history entries", entries.len());
                entries
            }
            Err(e) => {
                log::warn!("Ignoring unreadable history: {}", e);
                Vec::new()
            }
        }
    }

    fn persist(&mut self, entries: &[HistoryEntry]) -> Result<()> {
        let text = serde_json::to_string(entries)?;
        self.store.set(&self.key, &text)
    }

    /// Save a comparison result at the current time
    ///
    /// Returns `Ok(None)` without touching storage when the result carries a
    /// missing or zero amount or rate, or any non-finite value.
    pub fn append(
        &mut self,
        result: &ComparisonResult,
        rate_as_of: &str,
    ) -> Result<Option<HistoryEntry>> {
        self.append_at(result, rate_as_of, Utc::now())
    }

    /// Save a comparison result with an explicit creation time
    pub fn append_at(
        &mut self,
        result: &ComparisonResult,
        rate_as_of: &str,
        created_at: Timestamp,
    ) -> Result<Option<HistoryEntry>> {
        let valid = result.is_finite()
            && [result.krw_amount, result.usd_amount, result.published_rate]
                .iter()
                .all(|v| *v > 0.0);
        if !valid {
            log::warn!("Rejected history append with incomplete comparison");
            return Ok(None);
        }

        let mut entries = self.list();
        let id = generate_id(created_at, &entries);
        let entry = HistoryEntry::from_result(id, created_at, result, rate_as_of);

        entries.insert(0, entry.clone());
        entries.truncate(MAX_HISTORY_ENTRIES);
        self.persist(&entries)?;

        log::info!("Saved history entry {} ({} total)", entry.id, entries.len());
        Ok(Some(entry))
    }

    /// Delete the entry with `id`; unknown ids are a no-op
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let mut entries = self.list();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);

        if entries.len() == before {
            log::debug!("History entry {} not found", id);
            return Ok(());
        }

        self.persist(&entries)?;
        log::info!("Removed history entry {}", id);
        Ok(())
    }

    /// Delete every entry
    pub fn clear(&mut self) -> Result<()> {
        self.persist(&[])?;
        log::info!("Cleared history");
        Ok(())
    }

    /// Look up a single entry
    pub fn get(&self, id: &str) -> Option<HistoryEntry> {
        self.list().into_iter().find(|entry| entry.id == id)
    }
}
