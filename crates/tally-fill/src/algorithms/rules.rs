//! The four derivation rules
//!
//! Every rule inverts `count(n) = total(n) - total(n-1) + count(n-s)` for one
//! unknown term:
//!
//! ```text
//! ┌────────┬─────┬─────┬─────┬─────┐
//! │ index  │ n-s │ ... │ n-1 │  n  │
//! ├────────┼─────┼─────┼─────┼─────┤
//! │ count  │  a  │     │     │  b  │
//! ├────────┼─────┼─────┼─────┼─────┤
//! │ total  │     │     │  c  │  d  │
//! └────────┴─────┴─────┴─────┴─────┘
//! ```
//!
//! `a` is count-from-left, `b` count-from-right, `c` total-from-left and `d`
//! total-from-right. A rule re-reads storage when it runs, writes at most one
//! field, and never touches a field that is already known.

use crate::domain::entities::{Record, Slot};
use crate::domain::errors::TaskError;
use crate::domain::value_objects::{Index, Role, Span, Task};
use crate::ports::outbound::TimelineStore;

/// What executing a task did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The target field was unknown and is now stored.
    Derived { value: i64 },
    /// The target field was already known.
    AlreadyKnown,
    /// At least one input is still unknown.
    Blocked,
    /// The target index is outside the writable range.
    Boundary,
}

impl Outcome {
    pub fn is_derived(self) -> bool {
        matches!(self, Outcome::Derived { .. })
    }
}

/// Run `task` against `store`.
pub fn execute<S: TimelineStore + ?Sized>(
    store: &mut S,
    task: Task,
) -> Result<Outcome, TaskError> {
    let rule: fn(&mut S, Index, Span) -> Result<Outcome, TaskError> = match task.role {
        Role::CountFromRight => count_from_right::<S>,
        Role::TotalFromRight => total_from_right::<S>,
        Role::CountFromLeft => count_from_left::<S>,
        Role::TotalFromLeft => total_from_left::<S>,
    };
    rule(store, task.index, task.span)
}

/// `b`: count(n) = total(n) - total(n-1) + count(n-s)
pub fn count_from_right<S: TimelineStore + ?Sized>(
    store: &mut S,
    n: Index,
    span: Span,
) -> Result<Outcome, TaskError> {
    let Slot::Stored(mut target) = read(store, n)? else {
        return Ok(Outcome::Boundary);
    };
    if target.has_count() {
        return Ok(Outcome::AlreadyKnown);
    }
    let prev_index = n.checked_sub(1);
    let lag_index = n.checked_sub(span.offset());
    let (Some(prev_index), Some(lag_index)) = (prev_index, lag_index) else {
        return Ok(Outcome::Blocked);
    };

    let prev = read(store, prev_index)?;
    let lag = read(store, lag_index)?;

    let total = target.total(span);
    let prev_total = prev.record().total(span);
    let lag_count = lag.record().count;
    let (Some(total), Some(prev_total), Some(lag_count)) = (total, prev_total, lag_count) else {
        return Ok(Outcome::Blocked);
    };
    let Some(value) = solve(total, prev_total, lag_count) else {
        return Ok(Outcome::Blocked);
    };

    target.count = Some(value);
    commit(store, n, target)?;

    Ok(Outcome::Derived { value })
}

/// `d`: total(n) = count(n) + total(n-1) - count(n-s)
pub fn total_from_right<S: TimelineStore + ?Sized>(
    store: &mut S,
    n: Index,
    span: Span,
) -> Result<Outcome, TaskError> {
    let Slot::Stored(mut target) = read(store, n)? else {
        return Ok(Outcome::Boundary);
    };
    if target.has_total(span) {
        return Ok(Outcome::AlreadyKnown);
    }
    let prev_index = n.checked_sub(1);
    let lag_index = n.checked_sub(span.offset());
    let (Some(prev_index), Some(lag_index)) = (prev_index, lag_index) else {
        return Ok(Outcome::Blocked);
    };

    let prev = read(store, prev_index)?;
    let lag = read(store, lag_index)?;

    let count = target.count;
    let prev_total = prev.record().total(span);
    let lag_count = lag.record().count;
    let (Some(count), Some(prev_total), Some(lag_count)) = (count, prev_total, lag_count) else {
        return Ok(Outcome::Blocked);
    };
    let Some(value) = solve(count, lag_count, prev_total) else {
        return Ok(Outcome::Blocked);
    };

    target.totals.insert(span, value);
    commit(store, n, target)?;

    Ok(Outcome::Derived { value })
}

/// `a`: count(n-s) = total(n-1) - total(n) + count(n), solved at `m = n-s`
pub fn count_from_left<S: TimelineStore + ?Sized>(
    store: &mut S,
    m: Index,
    span: Span,
) -> Result<Outcome, TaskError> {
    let Slot::Stored(mut target) = read(store, m)? else {
        return Ok(Outcome::Boundary);
    };
    if target.has_count() {
        return Ok(Outcome::AlreadyKnown);
    }
    let Some(n) = m.checked_add(span.offset()) else {
        return Ok(Outcome::Blocked);
    };

    let right = read(store, n)?.into_record();
    let right_prev = read(store, n - 1)?.into_record();

    let total = right.total(span);
    let prev_total = right_prev.total(span);
    let (Some(total), Some(prev_total), Some(count)) = (total, prev_total, right.count) else {
        return Ok(Outcome::Blocked);
    };
    let Some(value) = solve(prev_total, total, count) else {
        return Ok(Outcome::Blocked);
    };

    target.count = Some(value);
    commit(store, m, target)?;

    Ok(Outcome::Derived { value })
}

/// `c`: total(n-1) = total(n) - count(n) + count(n-s), solved at `m = n-1`
pub fn total_from_left<S: TimelineStore + ?Sized>(
    store: &mut S,
    m: Index,
    span: Span,
) -> Result<Outcome, TaskError> {
    let Slot::Stored(mut target) = read(store, m)? else {
        return Ok(Outcome::Boundary);
    };
    if target.has_total(span) {
        return Ok(Outcome::AlreadyKnown);
    }
    let n = m.checked_add(1);
    let lag_index = n.and_then(|n| n.checked_sub(span.offset()));
    let (Some(n), Some(lag_index)) = (n, lag_index) else {
        return Ok(Outcome::Blocked);
    };

    let right = read(store, n)?.into_record();
    let lag = read(store, lag_index)?;

    let total = right.total(span);
    let lag_count = lag.record().count;
    let (Some(total), Some(count), Some(lag_count)) = (total, right.count, lag_count) else {
        return Ok(Outcome::Blocked);
    };
    let Some(value) = solve(total, count, lag_count) else {
        return Ok(Outcome::Blocked);
    };

    target.totals.insert(span, value);
    commit(store, m, target)?;

    Ok(Outcome::Derived { value })
}

/// `a - b + c`, or `None` when the result does not fit an `i64`.
///
/// Known values may be mutually inconsistent, so extreme inputs are expected.
fn solve(a: i64, b: i64, c: i64) -> Option<i64> {
    i64::try_from(i128::from(a) - i128::from(b) + i128::from(c)).ok()
}

fn read<S: TimelineStore + ?Sized>(store: &S, index: Index) -> Result<Slot, TaskError> {
    store
        .get(index)
        .map_err(|source| TaskError::Read { index, source })
}

fn commit<S: TimelineStore + ?Sized>(
    store: &mut S,
    index: Index,
    record: Record,
) -> Result<(), TaskError> {
    store
        .set(index, record)
        .map_err(|source| TaskError::Write { index, source })
}
