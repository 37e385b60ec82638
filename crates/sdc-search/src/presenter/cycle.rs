use sdc_core::{QueryContext, SuggestionList};

use crate::error::SearchError;

/// Tracks which query cycle is authoritative.
///
/// Every dispatched cycle and every close bumps the sequence; only an outcome
/// carrying the latest sequence may be rendered.
#[derive(Debug, Default)]
pub struct CycleTracker {
    latest: u64,
}

impl CycleTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new cycle and returns its sequence number.
    pub fn begin(&mut self) -> u64 {
        self.latest = self.latest.wrapping_add(1);
        self.latest
    }

    /// Supersedes any in-flight cycle without starting a new one.
    pub fn invalidate(&mut self) {
        self.latest = self.latest.wrapping_add(1);
    }

    #[must_use]
    pub fn is_current(&self, sequence: u64) -> bool {
        sequence == self.latest
    }

    #[must_use]
    pub fn latest(&self) -> u64 {
        self.latest
    }
}

/// Result of one aggregation, delivered back to the presenter.
#[derive(Debug)]
pub struct CycleOutcome {
    pub query: QueryContext,
    pub result: Result<SuggestionList, SearchError>,
}

impl CycleOutcome {
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.query.sequence()
    }
}

/// What the presenter did with a [`CycleOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDisposition {
    /// The list was rendered; carries the row count.
    Rendered(usize),
    /// A later cycle (or a close) superseded this one; nothing changed.
    Stale,
    /// The cycle failed; the dropdown was cleared.
    Failed,
}
