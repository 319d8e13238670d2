//! History entry type and id generation

use crate::comparator::{ComparisonResult, Direction};
use crate::types::{Amount, EntryId, Percentage, Rate, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved comparison. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: EntryId,
    pub created_at: Timestamp,
    /// Effective-date label of the published rate used
    pub rate_as_of: String,
    pub krw_amount: Amount,
    pub usd_amount: Amount,
    pub effective_rate: Rate,
    pub published_rate: Rate,
    pub delta_pct: Percentage,
}

impl HistoryEntry {
    /// Snapshot a comparison result
    pub fn from_result(
        id: EntryId,
        created_at: Timestamp,
        result: &ComparisonResult,
        rate_as_of: impl Into<String>,
    ) -> Self {
        Self {
            id,
            created_at,
            rate_as_of: rate_as_of.into(),
            krw_amount: result.krw_amount,
            usd_amount: result.usd_amount,
            effective_rate: result.effective_rate,
            published_rate: result.published_rate,
            delta_pct: result.delta_pct,
        }
    }

    pub fn direction(&self) -> Direction {
        Direction::from_delta(self.delta_pct)
    }

    /// USD the exchange gave up (positive) or gained (negative) against the published rate
    pub fn impact_usd(&self) -> Amount {
        self.usd_amount - self.krw_amount / self.published_rate
    }
}

/// Generate an entry id from the creation time and a random suffix
///
/// Retries until the id does not collide with any entry in `existing`.
pub fn generate_id(created_at: Timestamp, existing: &[HistoryEntry]) -> EntryId {
    loop {
        let suffix = Uuid::new_v4().simple().to_string();
        let id = format!("{}-{}", created_at.timestamp_millis(), &suffix[..8]);
        if !existing.iter().any(|entry| entry.id == id) {
            return id;
        }
    }
}
