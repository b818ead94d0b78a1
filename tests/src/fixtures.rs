//! Shared fixtures: synthetic ground-truth timelines and fault-injecting stores.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use tally_fill::{
    CancelToken, InMemoryTimeline, Index, Record, Slot, Span, StoreError, TimelineStore,
};

/// Spans from a list of lengths, skipping zero.
pub fn spans(lens: &[u32]) -> Vec<Span> {
    lens.iter().copied().filter_map(Span::new).collect()
}

/// A fully known timeline whose totals agree with its counts.
#[derive(Debug, Clone)]
pub struct SyntheticTimeline {
    pub counts: Vec<i64>,
    pub spans: Vec<Span>,
}

impl SyntheticTimeline {
    /// Random counts in `0..100`, reproducible from `seed`.
    pub fn generate(len: usize, spans: Vec<Span>, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let counts = (0..len).map(|_| rng.gen_range(0..100)).collect();
        Self { counts, spans }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn end(&self) -> Index {
        self.counts.len() as Index
    }

    pub fn total(&self, index: usize, span: Span) -> i64 {
        let start = (index + 1).saturating_sub(span.get() as usize);
        self.counts[start..=index].iter().sum()
    }

    /// Ground-truth record at `index`.
    pub fn truth(&self, index: usize) -> Record {
        self.spans.iter().fold(
            Record::with_count(self.counts[index]),
            |record, &span| record.with_total(span, self.total(index, span)),
        )
    }

    /// Store holding the fields selected by `keep(index, span)`.
    /// `span` is `None` for the count.
    pub fn store_where<F>(&self, mut keep: F) -> InMemoryTimeline
    where
        F: FnMut(usize, Option<Span>) -> bool,
    {
        let mut store = InMemoryTimeline::new();
        for index in 0..self.len() {
            let mut record = Record::unknown();
            if keep(index, None) {
                record.count = Some(self.counts[index]);
            }
            for &span in &self.spans {
                if keep(index, Some(span)) {
                    record.totals.insert(span, self.total(index, span));
                }
            }
            store = store.with_record(index as Index, record);
        }
        store
    }

    /// Store keeping each field independently with probability `keep`.
    pub fn masked(&self, keep: f64, seed: u64) -> InMemoryTimeline {
        let mut rng = StdRng::seed_from_u64(seed);
        self.store_where(|_, _| rng.gen_bool(keep))
    }

    /// Indices whose stored record contradicts the ground truth.
    pub fn mismatches(&self, store: &InMemoryTimeline) -> Vec<Index> {
        store
            .iter()
            .filter(|&(index, record)| {
                !tally_fill::preserves_known(record, &self.truth(index as usize))
            })
            .map(|(index, _)| index)
            .collect()
    }
}

/// Store that rejects writes at chosen indices.
#[derive(Debug, Clone)]
pub struct FlakyStore {
    pub inner: InMemoryTimeline,
    rejected: HashSet<Index>,
    pub writes: usize,
}

impl FlakyStore {
    pub fn new(inner: InMemoryTimeline) -> Self {
        Self {
            inner,
            rejected: HashSet::new(),
            writes: 0,
        }
    }

    pub fn reject_writes_at(mut self, index: Index) -> Self {
        self.rejected.insert(index);
        self
    }
}

impl TimelineStore for FlakyStore {
    fn get(&self, index: Index) -> Result<Slot, StoreError> {
        self.inner.get(index)
    }

    fn set(&mut self, index: Index, record: Record) -> Result<(), StoreError> {
        if self.rejected.contains(&index) {
            return Err(StoreError::backend(format!("disk full at {index}")));
        }
        self.writes += 1;
        self.inner.set(index, record)
    }
}

/// Store that trips a cancel token once it has accepted `limit` writes.
#[derive(Debug)]
pub struct TrippingStore {
    pub inner: InMemoryTimeline,
    pub token: CancelToken,
    limit: usize,
    pub writes: usize,
}

impl TrippingStore {
    pub fn new(inner: InMemoryTimeline, token: CancelToken, limit: usize) -> Self {
        Self {
            inner,
            token,
            limit,
            writes: 0,
        }
    }
}

impl TimelineStore for TrippingStore {
    fn get(&self, index: Index) -> Result<Slot, StoreError> {
        self.inner.get(index)
    }

    fn set(&mut self, index: Index, record: Record) -> Result<(), StoreError> {
        self.inner.set(index, record)?;
        self.writes += 1;
        if self.writes >= self.limit {
            self.token.cancel();
        }
        Ok(())
    }
}
