//! Interactive comparison session
//!
//! Owns the state an interactive shell needs between user actions: the
//! published rate and its fetch lifecycle, the two amounts as typed, the
//! latest comparison outcome and the history store. The shell calls the
//! setters (or [`Session::recompute`]) whenever an amount or the rate
//! changes; nothing here depends on an event loop.
//!
//! # Example
//!
//! ```rust
//! use rate_gap::prelude::*;
//!
//! let mut session = Session::new(MemoryStore::new());
//! let ticket = session.begin_refresh();
//! session.finish_refresh(ticket, PublishedRate::new(1350.0, "2024-01-02"));
//!
//! session.set_krw_text("135,000");
//! session.set_usd_text("95");
//! assert!(session.can_save());
//!
//! let entry = session.save().unwrap().unwrap();
//! assert_eq!(session.history()[0].id, entry.id);
//! ```

use crate::comparator::{compare_text, Outcome, Unavailable};
use crate::error::Result;
use crate::format::{ComparisonView, RateView};
use crate::history::{HistoryEntry, HistoryLog, HistoryStore};
use crate::rates::{PublishedRate, RateSource, RateStatus};
use crate::storage::KeyValueStore;

/// Identifies one rate fetch; only the most recently issued ticket may apply its response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket(u64);

/// State of one interactive comparison session
pub struct Session<S: KeyValueStore> {
    rate_status: RateStatus,
    krw_text: String,
    usd_text: String,
    outcome: Outcome,
    history: HistoryStore<S>,
    latest_ticket: u64,
}

impl<S: KeyValueStore> Session<S> {
    /// Create a session with default history settings over `store`
    pub fn new(store: S) -> Self {
        Self::with_history(HistoryStore::new(store))
    }

    pub fn with_history(history: HistoryStore<S>) -> Self {
        Self {
            rate_status: RateStatus::Idle,
            krw_text: String::new(),
            usd_text: String::new(),
            outcome: Err(Unavailable::NoPublishedRate),
            history,
            latest_ticket: 0,
        }
    }

    pub fn rate_status(&self) -> &RateStatus {
        &self.rate_status
    }

    pub fn published_rate(&self) -> Option<&PublishedRate> {
        self.rate_status.published()
    }

    pub fn krw_text(&self) -> &str {
        &self.krw_text
    }

    pub fn usd_text(&self) -> &str {
        &self.usd_text
    }

    /// Replace the KRW amount text and recompute
    pub fn set_krw_text(&mut self, text: impl Into<String>) -> &Outcome {
        self.krw_text = text.into();
        self.recompute()
    }

    /// Replace the USD amount text and recompute
    pub fn set_usd_text(&mut self, text: impl Into<String>) -> &Outcome {
        self.usd_text = text.into();
        self.recompute()
    }

    /// Recompute the outcome from the current amounts and published rate
    pub fn recompute(&mut self) -> &Outcome {
        self.outcome = compare_text(&self.krw_text, &self.usd_text, self.rate_status.rate());
        &self.outcome
    }

    /// Latest computed outcome
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Start a rate fetch
    ///
    /// The published rate is unset until a response for the returned ticket
    /// arrives, so comparisons in the meantime report `NoPublishedRate`.
    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.latest_ticket += 1;
        self.rate_status = RateStatus::Fetching;
        self.recompute();
        log::debug!("Started rate fetch #{}", self.latest_ticket);
        FetchTicket(self.latest_ticket)
    }

    /// Apply a fetch response
    ///
    /// Responses for a ticket older than the latest issued one are discarded.
    /// Returns whether the response was applied.
    pub fn finish_refresh(
        &mut self,
        ticket: FetchTicket,
        response: Result<PublishedRate>,
    ) -> bool {
        if ticket.0 != self.latest_ticket {
            log::warn!(
                "Discarding superseded rate response #{} (latest #{})",
                ticket.0,
                self.latest_ticket
            );
            return false;
        }

        self.rate_status = match response {
            Ok(published) => {
                log::info!(
                    "Published rate {} as of {}",
                    published.rate(),
                    published.as_of()
                );
                RateStatus::Available(published)
            }
            Err(e) => {
                log::warn!("Rate fetch failed: {}", e);
                RateStatus::Failed(e.to_string())
            }
        };
        self.recompute();
        true
    }

    /// Fetch from `source` and apply the response
    pub async fn refresh<R: RateSource>(&mut self, source: &R) -> bool {
        let ticket = self.begin_refresh();
        let response = source.fetch().await;
        self.finish_refresh(ticket, response)
    }

    /// Use a known rate directly, superseding any outstanding fetch
    pub fn set_published_rate(&mut self, published: PublishedRate) {
        let ticket = self.begin_refresh();
        self.finish_refresh(ticket, Ok(published));
    }

    /// Whether there is a valid result to save
    pub fn can_save(&self) -> bool {
        self.outcome.is_ok() && self.published_rate().is_some()
    }

    /// Save the current result to history
    ///
    /// Returns `Ok(None)` when there is nothing valid to save.
    pub fn save(&mut self) -> Result<Option<HistoryEntry>> {
        let (result, as_of) = match (&self.outcome, self.rate_status.published()) {
            (Ok(result), Some(published)) => (*result, published.as_of().to_string()),
            _ => {
                log::debug!("Nothing to save: {:?}", self.outcome);
                return Ok(None);
            }
        };
        self.history.append(&result, &as_of)
    }

    /// Delete a history entry by id
    pub fn remove(&mut self, id: &str) -> Result<()> {
        self.history.remove(id)
    }

    /// Delete all history entries
    pub fn clear_history(&mut self) -> Result<()> {
        self.history.clear()
    }

    pub fn history(&self) -> HistoryLog {
        self.history.list()
    }

    pub fn history_store(&self) -> &HistoryStore<S> {
        &self.history
    }

    /// Display text for the result panel
    pub fn view(&self) -> ComparisonView {
        ComparisonView::from_outcome(&self.outcome)
    }

    /// Display text for the published rate panel
    pub fn rate_view(&self) -> RateView {
        RateView::from_status(&self.rate_status)
    }
}
