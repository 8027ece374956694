//! Dispatcher statistics

use super::DispatchOutcome;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub(crate) struct DispatchStats {
    submitted: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
    created: AtomicU64,
    displayed: AtomicU64,
    summaries: AtomicU64,
}

impl DispatchStats {
    pub(crate) fn record_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_outcome(&self, outcome: &DispatchOutcome) {
        if outcome.is_success() {
            self.completed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
        if outcome.flags.created {
            self.created.fetch_add(1, Ordering::Relaxed);
        }
        if outcome.flags.displayed {
            self.displayed.fetch_add(1, Ordering::Relaxed);
        }
        if outcome.summary_id.is_some() {
            self.summaries.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn snapshot(&self) -> DispatchStatsSnapshot {
        DispatchStatsSnapshot {
            submitted: self.submitted.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            created: self.created.load(Ordering::Relaxed),
            displayed: self.displayed.load(Ordering::Relaxed),
            summaries: self.summaries.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time dispatcher counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchStatsSnapshot {
    pub submitted: u64,
    /// Units that finished with a result, shown or not
    pub completed: u64,
    pub failed: u64,
    pub created: u64,
    pub displayed: u64,
    pub summaries: u64,
}

impl DispatchStatsSnapshot {
    /// Units accepted but not finished yet
    pub fn in_flight(&self) -> u64 {
        self.submitted
            .saturating_sub(self.completed)
            .saturating_sub(self.failed)
    }
}
