//! FIFO work queue of derivation tasks
//!
//! Breadth-first order keeps convergence predictable; the rule set reaches
//! the same fixed point in any order.

use crate::domain::value_objects::Task;
use std::collections::{HashSet, VecDeque};

/// Queue of pending derivation tasks.
#[derive(Debug, Default)]
pub struct WorkQueue {
    tasks: VecDeque<Task>,
    /// Tasks currently waiting, tracked only when coalescing.
    pending: Option<HashSet<Task>>,
    accepted: usize,
    coalesced: usize,
}

impl WorkQueue {
    /// Plain FIFO, every enqueue is kept.
    pub fn new() -> Self {
        Self::default()
    }

    /// FIFO that drops a task identical to one already waiting.
    ///
    /// A task leaves the pending set when dequeued, so it can be scheduled again.
    pub fn coalescing() -> Self {
        Self {
            pending: Some(HashSet::new()),
            ..Self::default()
        }
    }

    /// Append tasks in order. Returns how many were accepted.
    pub fn enqueue<I>(&mut self, tasks: I) -> usize
    where
        I: IntoIterator<Item = Task>,
    {
        let mut accepted = 0;
        for task in tasks {
            if let Some(pending) = self.pending.as_mut() {
                if !pending.insert(task) {
                    self.coalesced += 1;
                    continue;
                }
            }
            self.tasks.push_back(task);
            accepted += 1;
        }
        self.accepted += accepted;
        accepted
    }

    /// Remove and return the oldest task.
    pub fn dequeue(&mut self) -> Option<Task> {
        let task = self.tasks.pop_front()?;
        if let Some(pending) = self.pending.as_mut() {
            pending.remove(&task);
        }
        Some(task)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Total tasks ever accepted.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Total tasks dropped as duplicates of a waiting task.
    pub fn coalesced(&self) -> usize {
        self.coalesced
    }
}
