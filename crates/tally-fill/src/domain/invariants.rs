//! Domain invariants for the gap filler
//!
//! Checks callers can run after a propagation to audit storage.

use super::entities::Record;
use super::errors::StoreError;
use super::value_objects::{Index, Span};
use crate::ports::outbound::TimelineStore;

/// A recurrence instance whose four terms are known but disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub index: Index,
    pub span: Span,
    /// Stored count(n).
    pub count: i64,
    /// total(n) - total(n-1) + count(n-s), which may not fit an `i64`.
    pub expected: i128,
}

/// INVARIANT-1: Recurrence Consistency
/// For every checked `(n, s)` with count(n), count(n-s), total_s(n) and
/// total_s(n-1) all known, `count(n) = total_s(n) - total_s(n-1) + count(n-s)`.
pub fn recurrence_violations<S, I>(
    store: &S,
    indices: I,
    spans: &[Span],
) -> Result<Vec<Violation>, StoreError>
where
    S: TimelineStore + ?Sized,
    I: IntoIterator<Item = Index>,
{
    let mut violations = Vec::new();

    for index in indices {
        let Some(prev_index) = index.checked_sub(1) else {
            continue;
        };
        let here = store.get(index)?.into_record();
        let prev = store.get(prev_index)?.into_record();

        for &span in spans {
            let Some(lag_index) = index.checked_sub(span.offset()) else {
                continue;
            };
            let lag = store.get(lag_index)?.into_record();

            let terms = (here.count, here.total(span), prev.total(span), lag.count);
            let (Some(count), Some(total), Some(prev_total), Some(lag_count)) = terms else {
                continue;
            };

            let expected = i128::from(total) - i128::from(prev_total) + i128::from(lag_count);
            if i128::from(count) != expected {
                violations.push(Violation {
                    index,
                    span,
                    count,
                    expected,
                });
            }
        }
    }

    Ok(violations)
}

/// INVARIANT-2: No Overwrite
/// Every field known in `before` holds the same value in `after`.
pub fn preserves_known(before: &Record, after: &Record) -> bool {
    if before.count.is_some() && before.count != after.count {
        return false;
    }

    before
        .totals
        .iter()
        .all(|(span, total)| after.total(*span) == Some(*total))
}
