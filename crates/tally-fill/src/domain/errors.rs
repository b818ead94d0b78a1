//! Error types for the gap filler
//!
//! A task that cannot resolve yet is not an error; only storage failures are.

use super::value_objects::{Index, Task};
use crate::application::report::RunReport;
use thiserror::Error;

/// Errors reported by a timeline store adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Backend I/O or connectivity failure.
    #[error("storage backend failure: {message}")]
    Backend { message: String },

    /// Attempt to write a boundary index.
    #[error("index {index} is outside the writable range")]
    Immutable { index: Index },
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend {
            message: message.into(),
        }
    }
}

/// Failure of a single derivation task.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("read of index {index} failed: {source}")]
    Read {
        index: Index,
        #[source]
        source: StoreError,
    },

    #[error("write of index {index} failed: {source}")]
    Write {
        index: Index,
        #[source]
        source: StoreError,
    },
}

/// A failed task and why it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    pub task: Task,
    pub error: TaskError,
}

/// Aggregate of every task that failed during one run.
///
/// Writes made by other tasks of the same run stay in storage.
#[derive(Debug, Error)]
#[error("{} derivation task(s) failed while propagating from index {}", .failures.len(), .report.index)]
pub struct PropagationError {
    pub failures: Vec<TaskFailure>,
    pub report: RunReport,
}

/// Invalid span configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("at least one span is required")]
    NoSpans,

    #[error("span length must be positive")]
    ZeroSpan,

    #[error("span {0} is configured more than once")]
    DuplicateSpan(u32),

    #[error("could not parse span list {input:?}: {reason}")]
    Unparsable { input: String, reason: String },
}
