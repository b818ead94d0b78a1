//! Per-run bookkeeping.

use crate::domain::value_objects::Index;
use serde::{Deserialize, Serialize};

/// What one propagation run did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Target index the run was seeded from.
    pub index: Index,
    /// Tasks dequeued and executed.
    pub tasks_executed: usize,
    pub counts_derived: usize,
    pub totals_derived: usize,
    /// Tasks that found their target known, an input unknown, or a boundary.
    pub no_ops: usize,
    pub failed: usize,
    /// Tasks accepted by the queue, seeds included.
    pub tasks_enqueued: usize,
    /// Tasks dropped because an identical task was already waiting.
    pub duplicates_coalesced: usize,
    /// Tasks still queued when the run was cancelled.
    pub cancelled: Option<usize>,
}

impl RunReport {
    pub fn new(index: Index) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    pub fn derived(&self) -> usize {
        self.counts_derived + self.totals_derived
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled.is_some()
    }
}
