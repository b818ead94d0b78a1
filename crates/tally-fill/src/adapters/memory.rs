use crate::domain::entities::{Record, Slot};
use crate::domain::errors::StoreError;
use crate::domain::value_objects::Index;
use crate::ports::outbound::TimelineStore;
use std::collections::BTreeMap;

/// In-memory timeline for tests and embedding.
///
/// The populated range is `0..end`, where `end` is one past the highest index
/// ever stored (or a larger horizon set with [`InMemoryTimeline::with_horizon`]).
/// Indices inside the range without a record read as fully unknown and are
/// writable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InMemoryTimeline {
    records: BTreeMap<Index, Record>,
    end: Index,
}

impl InMemoryTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder for test fixtures.
    ///
    /// # Panics
    ///
    /// Panics if `index` is negative.
    pub fn with_record(mut self, index: Index, record: Record) -> Self {
        assert!(index >= 0, "cannot store a record before the timeline start");
        self.records.insert(index, record);
        self.end = self.end.max(index.saturating_add(1));
        self
    }

    /// Extend the populated range to `0..end`.
    pub fn with_horizon(mut self, end: Index) -> Self {
        self.end = self.end.max(end);
        self
    }

    /// One past the last index of the populated range.
    pub fn end(&self) -> Index {
        self.end
    }

    pub fn record(&self, index: Index) -> Option<&Record> {
        self.records.get(&index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Index, &Record)> {
        self.records.iter().map(|(index, record)| (*index, record))
    }

    /// Copy of every stored record.
    pub fn snapshot(&self) -> BTreeMap<Index, Record> {
        self.records.clone()
    }
}

impl TimelineStore for InMemoryTimeline {
    fn get(&self, index: Index) -> Result<Slot, StoreError> {
        if index < 0 {
            return Ok(Slot::before_start());
        }
        if index >= self.end {
            return Ok(Slot::past_end());
        }
        Ok(Slot::Stored(
            self.records.get(&index).cloned().unwrap_or_default(),
        ))
    }

    fn set(&mut self, index: Index, record: Record) -> Result<(), StoreError> {
        if index < 0 {
            return Err(StoreError::Immutable { index });
        }
        self.records.insert(index, record);
        self.end = self.end.max(index.saturating_add(1));
        Ok(())
    }
}
