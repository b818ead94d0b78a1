//! Algorithms module for the gap filler
//!
//! Contains:
//! - FIFO work queue
//! - The four derivation rules
//! - Seed and follow-up expansion

pub mod expansion;
pub mod queue;
pub mod rules;

pub use expansion::{after_count, after_derivation, after_total, seeds};
pub use queue::WorkQueue;
pub use rules::{execute, Outcome};
