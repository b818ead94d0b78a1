//! Seed and follow-up task expansion
//!
//! A newly known value can complete any recurrence instance it belongs to.
//! The follow-ups are the other three roles of each such instance.
//!
//! A count at `n` belongs to instance `n` (as `count(n)`) and instance `n+s`
//! (as `count(n+s-s)`) for every span. A total for span `s` at `n` belongs to
//! instance `n` (as `total(n)`) and instance `n+1` (as `total(n+1-1)`), for
//! that span only.

use crate::domain::value_objects::{Index, Role, Span, Task};

/// Four roles anchored at `index`, per span.
pub fn seeds(index: Index, spans: &[Span]) -> Vec<Task> {
    let mut tasks = Vec::with_capacity(spans.len() * 4);
    for &span in spans {
        let targets = [
            (Role::CountFromRight, Some(index)),
            (Role::TotalFromRight, Some(index)),
            (Role::TotalFromLeft, index.checked_sub(1)),
            (Role::CountFromLeft, index.checked_sub(span.offset())),
        ];
        tasks.extend(tasks_at(span, targets));
    }
    tasks
}

/// Follow-ups once count(index) is known.
pub fn after_count(index: Index, spans: &[Span]) -> Vec<Task> {
    let mut tasks = Vec::with_capacity(spans.len() * 6);
    for &span in spans {
        let ahead = index.checked_add(span.offset());
        let targets = [
            // index as the lagged count of instance index+s
            (Role::CountFromRight, ahead),
            (Role::TotalFromLeft, ahead.map(|n| n - 1)),
            (Role::TotalFromRight, ahead),
            // index as the leading count of its own instance
            (Role::CountFromLeft, index.checked_sub(span.offset())),
            (Role::TotalFromLeft, index.checked_sub(1)),
            (Role::TotalFromRight, Some(index)),
        ];
        tasks.extend(tasks_at(span, targets));
    }
    tasks
}

/// Follow-ups once total_span(index) is known.
pub fn after_total(index: Index, span: Span) -> Vec<Task> {
    let next = index.checked_add(1);
    let targets = [
        // index as the trailing total of instance index+1
        (Role::CountFromRight, next),
        (Role::CountFromLeft, next.and_then(|n| n.checked_sub(span.offset()))),
        (Role::TotalFromRight, next),
        // index as the leading total of its own instance
        (Role::CountFromRight, Some(index)),
        (Role::CountFromLeft, index.checked_sub(span.offset())),
        (Role::TotalFromLeft, index.checked_sub(1)),
    ];
    tasks_at(span, targets).collect()
}

/// Tasks for each `(role, index)` pair. Indices outside the `i64` range are skipped.
fn tasks_at<const N: usize>(
    span: Span,
    targets: [(Role, Option<Index>); N],
) -> impl Iterator<Item = Task> {
    targets
        .into_iter()
        .filter_map(move |(role, index)| Some(role.at(index?, span)))
}

/// Follow-ups for a task that just derived a value.
pub fn after_derivation(task: Task, spans: &[Span]) -> Vec<Task> {
    if task.role.solves_count() {
        after_count(task.index, spans)
    } else {
        after_total(task.index, task.span)
    }
}
