//! # Tally Fill: Rolling-Total Gap Filler
//!
//! Fills unknown counts and rolling totals on a sparsely known timeline using
//! the recurrence `count(n) = total_s(n) - total_s(n-1) + count(n-s)` for every
//! configured window length `s`.
//!
//! ## Architecture
//!
//! - **Domain**: Records, slots, spans, derivation tasks, errors, invariants
//! - **Algorithms**: FIFO work queue, the four derivation rules, follow-up expansion
//! - **Ports**: Inbound (`GapFillApi`) and Outbound (`TimelineStore`)
//! - **Adapters**: In-memory timeline
//! - **Application**: The `Propagator` drain loop, run reports, cancellation
//!
//! ## Usage
//!
//! ```
//! use tally_fill::{GapFillApi, InMemoryTimeline, Propagator, Record, Span};
//!
//! let two = Span::new(2).unwrap();
//! let zero = Record::with_count(0).with_total(two, 0);
//! let store = InMemoryTimeline::new()
//!     .with_record(0, zero.clone())
//!     .with_record(1, zero.clone())
//!     .with_record(2, zero)
//!     .with_record(3, Record::unknown().with_total(two, 3));
//!
//! let mut propagator = Propagator::new(vec![two], store);
//! propagator.run(3).unwrap();
//!
//! assert_eq!(propagator.store().record(3).and_then(|r| r.count), Some(3));
//! ```

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::InMemoryTimeline;
pub use application::cancel::CancelToken;
pub use application::report::RunReport;
pub use application::service::Propagator;
pub use config::FillConfig;
pub use domain::entities::*;
pub use domain::errors::{ConfigError, PropagationError, StoreError, TaskError, TaskFailure};
pub use domain::invariants::{preserves_known, recurrence_violations, Violation};
pub use domain::value_objects::*;
pub use ports::inbound::GapFillApi;
pub use ports::outbound::TimelineStore;
