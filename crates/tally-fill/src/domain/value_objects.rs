//! Value objects for the gap filler
//!
//! Indices, spans, derivation roles and the tasks built from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position on the timeline. Negative positions are the before-start boundary.
pub type Index = i64;

/// Raw sentinel used by external stores for an unknown count.
pub const UNKNOWN_COUNT: i64 = -1;

/// Window length of a rolling total.
///
/// Always positive; construct through [`Span::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Span(u32);

impl Span {
    /// Returns `None` for a zero-length window.
    pub fn new(len: u32) -> Option<Self> {
        (len > 0).then_some(Self(len))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Span as a timeline offset.
    pub fn offset(self) -> Index {
        Index::from(self.0)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which term of `count(n) = total(n) - total(n-1) + count(n-s)` a task solves for.
///
/// The task index always points at the field being solved:
///
/// ```text
///            n-s    ...    n-1     n
///  count   [left]                [right]
///  total                 [left]  [right]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// count(n) from total(n), total(n-1), count(n-s)
    CountFromRight,
    /// total(n) from count(n), total(n-1), count(n-s)
    TotalFromRight,
    /// count(n-s) from total(n), total(n-1), count(n)
    CountFromLeft,
    /// total(n-1) from total(n), count(n), count(n-s)
    TotalFromLeft,
}

impl Role {
    /// True when the role writes a count rather than a rolling total.
    pub fn solves_count(self) -> bool {
        matches!(self, Role::CountFromRight | Role::CountFromLeft)
    }

    /// Build a task for this role targeting `index`.
    pub fn at(self, index: Index, span: Span) -> Task {
        Task {
            index,
            span,
            role: self,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::CountFromRight => "count-from-right",
            Role::TotalFromRight => "total-from-right",
            Role::CountFromLeft => "count-from-left",
            Role::TotalFromLeft => "total-from-left",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deferred derivation: solve `role` for the field at `index` under `span`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Task {
    pub index: Index,
    pub span: Span,
    pub role: Role,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}/span {}", self.role, self.index, self.span)
    }
}
