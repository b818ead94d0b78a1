//! Propagation Service
//!
//! Main service implementing GapFillApi.

use crate::algorithms::{after_derivation, execute, seeds, Outcome, WorkQueue};
use crate::application::cancel::CancelToken;
use crate::application::report::RunReport;
use crate::config::FillConfig;
use crate::domain::errors::{ConfigError, PropagationError, TaskFailure};
use crate::domain::value_objects::{Index, Span};
use crate::ports::inbound::GapFillApi;
use crate::ports::outbound::TimelineStore;

use tracing::{debug, info, info_span, trace, warn};

/// Worklist propagator
///
/// Orchestrates one run:
/// 1. Seed four roles around the target index for every span
/// 2. Dequeue and execute tasks against the store
/// 3. After each derivation, enqueue the tasks it may have unblocked
/// 4. Collect failures without stopping
pub struct Propagator<S> {
    spans: Vec<Span>,
    store: S,
    coalesce_pending: bool,
}

impl<S: TimelineStore> Propagator<S> {
    /// Create a propagator over `store` with a plain FIFO queue.
    pub fn new(spans: Vec<Span>, store: S) -> Self {
        Self {
            spans,
            store,
            coalesce_pending: false,
        }
    }

    /// Create a propagator from validated configuration.
    pub fn with_config(config: &FillConfig, store: S) -> Result<Self, ConfigError> {
        Ok(Self {
            spans: config.validated_spans()?,
            store,
            coalesce_pending: config.coalesce_pending,
        })
    }

    /// Toggle dropping of tasks already waiting in the queue.
    pub fn with_coalescing(mut self, enabled: bool) -> Self {
        self.coalesce_pending = enabled;
        self
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn drain(
        &mut self,
        index: Index,
        cancel: Option<&CancelToken>,
    ) -> Result<RunReport, PropagationError> {
        let span = info_span!("propagate", index);
        let _guard = span.enter();

        let mut queue = if self.coalesce_pending {
            WorkQueue::coalescing()
        } else {
            WorkQueue::new()
        };
        queue.enqueue(seeds(index, &self.spans));

        info!(
            spans = ?self.spans,
            seeds = queue.len(),
            "Propagating from index"
        );

        let mut report = RunReport::new(index);
        let mut failures = Vec::new();

        while !queue.is_empty() {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                warn!(pending = queue.len(), "Propagation cancelled");
                report.cancelled = Some(queue.len());
                break;
            }
            let Some(task) = queue.dequeue() else {
                break;
            };
            report.tasks_executed += 1;

            match execute(&mut self.store, task) {
                Ok(Outcome::Derived { value }) => {
                    debug!(%task, value, "Derived value");
                    if task.role.solves_count() {
                        report.counts_derived += 1;
                    } else {
                        report.totals_derived += 1;
                    }
                    queue.enqueue(after_derivation(task, &self.spans));
                }
                Ok(outcome) => {
                    trace!(%task, ?outcome, "No-op task");
                    report.no_ops += 1;
                }
                Err(error) => {
                    warn!(%task, %error, "Derivation task failed");
                    report.failed += 1;
                    failures.push(TaskFailure { task, error });
                }
            }
        }

        report.tasks_enqueued = queue.accepted();
        report.duplicates_coalesced = queue.coalesced();

        info!(
            executed = report.tasks_executed,
            counts = report.counts_derived,
            totals = report.totals_derived,
            no_ops = report.no_ops,
            failed = report.failed,
            coalesced = report.duplicates_coalesced,
            "Propagation complete"
        );

        if failures.is_empty() {
            Ok(report)
        } else {
            Err(PropagationError { failures, report })
        }
    }
}

impl<S: TimelineStore> GapFillApi for Propagator<S> {
    fn run(&mut self, index: Index) -> Result<RunReport, PropagationError> {
        self.drain(index, None)
    }

    fn run_until(
        &mut self,
        index: Index,
        cancel: &CancelToken,
    ) -> Result<RunReport, PropagationError> {
        self.drain(index, Some(cancel))
    }
}
