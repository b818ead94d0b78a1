//! Core entities for the gap filler
//!
//! A [`Record`] is everything the timeline knows about one index. A [`Slot`]
//! is what a store hands back for an index: either a stored record or a
//! synthesized boundary record that must never be written.

use super::value_objects::{Span, UNKNOWN_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Count and rolling totals at a single timeline index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Count at this index, `None` when unknown.
    pub count: Option<i64>,
    /// Rolling total per span, ending at this index inclusive.
    /// A missing span means the total is unknown.
    #[serde(default)]
    pub totals: BTreeMap<Span, i64>,
}

impl Record {
    /// Nothing known.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Record synthesized for indices before the start of the timeline.
    pub fn before_start() -> Self {
        Self {
            count: Some(0),
            totals: BTreeMap::new(),
        }
    }

    pub fn with_count(count: i64) -> Self {
        Self {
            count: Some(count),
            totals: BTreeMap::new(),
        }
    }

    /// Build from a raw store count where `-1` means unknown.
    pub fn from_raw(count: i64) -> Self {
        Self {
            count: (count != UNKNOWN_COUNT).then_some(count),
            totals: BTreeMap::new(),
        }
    }

    pub fn with_total(mut self, span: Span, total: i64) -> Self {
        self.totals.insert(span, total);
        self
    }

    /// Count in raw store form, `-1` when unknown.
    pub fn raw_count(&self) -> i64 {
        self.count.unwrap_or(UNKNOWN_COUNT)
    }

    pub fn total(&self, span: Span) -> Option<i64> {
        self.totals.get(&span).copied()
    }

    pub fn has_count(&self) -> bool {
        self.count.is_some()
    }

    pub fn has_total(&self, span: Span) -> bool {
        self.totals.contains_key(&span)
    }
}

/// Result of a store lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    /// Index inside the populated range.
    Stored(Record),
    /// Synthesized record outside the populated range. Immutable.
    Boundary(Record),
}

impl Slot {
    /// Boundary for any index < 0: count 0, no totals.
    pub fn before_start() -> Self {
        Slot::Boundary(Record::before_start())
    }

    /// Boundary for indices past the populated range: nothing known.
    pub fn past_end() -> Self {
        Slot::Boundary(Record::unknown())
    }

    pub fn record(&self) -> &Record {
        match self {
            Slot::Stored(record) | Slot::Boundary(record) => record,
        }
    }

    pub fn into_record(self) -> Record {
        match self {
            Slot::Stored(record) | Slot::Boundary(record) => record,
        }
    }

    pub fn is_boundary(&self) -> bool {
        matches!(self, Slot::Boundary(_))
    }
}
