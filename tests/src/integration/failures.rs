//! # Failure and Cancellation Flows
//!
//! Storage faults abort single tasks without stopping the drain, and a
//! cancelled run keeps what it already wrote.

#[cfg(test)]
mod tests {
    use tally_fill::{
        CancelToken, GapFillApi, InMemoryTimeline, Propagator, StoreError, TaskError,
    };
    use tally_telemetry::metrics::{outcome_label, record_result};

    use crate::fixtures::{spans, FlakyStore, SyntheticTimeline, TrippingStore};

    /// 40 known counts over spans {1, 3, 7}, totals only at index 0.
    fn forward_seeded() -> (SyntheticTimeline, InMemoryTimeline) {
        let truth = SyntheticTimeline::generate(40, spans(&[1, 3, 7]), 21);
        let store = truth.store_where(|index, span| span.is_none() || index == 0);
        (truth, store)
    }

    #[test]
    fn test_rejected_writes_stop_only_their_cascade() {
        let (truth, store) = forward_seeded();
        let mut propagator =
            Propagator::new(truth.spans.clone(), FlakyStore::new(store).reject_writes_at(20));

        let result = propagator.run(1);
        record_result(&result);
        let err = result.unwrap_err();

        assert!(!err.failures.is_empty());
        for failure in &err.failures {
            assert_eq!(failure.task.index, 20);
            assert!(matches!(
                failure.error,
                TaskError::Write {
                    index: 20,
                    source: StoreError::Backend { .. }
                }
            ));
        }
        assert_eq!(err.report.failed, err.failures.len());
        assert_eq!(err.report.totals_derived, 19 * 3);
        assert_eq!(outcome_label(&err.report), "failed");

        let timeline = &propagator.store().inner;
        assert!(truth.mismatches(timeline).is_empty());
        assert!((21..truth.end()).all(|index| {
            timeline
                .record(index)
                .is_some_and(|record| record.totals.is_empty())
        }));
    }

    #[test]
    fn test_failure_message_names_the_run() {
        let (truth, store) = forward_seeded();
        let mut propagator =
            Propagator::new(truth.spans.clone(), FlakyStore::new(store).reject_writes_at(2));

        let err = propagator.run(1).unwrap_err();

        assert!(err.to_string().contains("from index 1"));
        assert_eq!(propagator.store().writes, 3);
    }

    #[test]
    fn test_cancel_mid_run_keeps_partial_fill() {
        let (truth, store) = forward_seeded();
        let token = CancelToken::new();
        let mut propagator = Propagator::new(
            truth.spans.clone(),
            TrippingStore::new(store, token.clone(), 5),
        );

        let report = propagator.run_until(1, &token).unwrap();

        assert!(report.was_cancelled());
        assert!(report.cancelled.is_some_and(|pending| pending > 0));
        assert_eq!(report.totals_derived, 5);
        assert_eq!(propagator.store().writes, 5);
        assert_eq!(outcome_label(&report), "cancelled");
        assert!(truth.mismatches(&propagator.store().inner).is_empty());
    }

    #[test]
    fn test_cancelled_token_leaves_store_untouched() {
        let (truth, store) = forward_seeded();
        let token = CancelToken::new();
        token.cancel();
        let mut propagator = Propagator::new(truth.spans.clone(), store.clone());

        let report = propagator.run_until(1, &token).unwrap();

        assert_eq!(report.tasks_executed, 0);
        assert_eq!(report.cancelled, Some(4 * truth.spans.len()));
        assert_eq!(propagator.store(), &store);
    }

    #[test]
    fn test_token_shared_across_threads() {
        let (truth, store) = forward_seeded();
        let token = CancelToken::new();
        let remote = token.clone();

        std::thread::spawn(move || remote.cancel())
            .join()
            .unwrap();

        let mut propagator = Propagator::new(truth.spans.clone(), store);
        let report = propagator.run_until(1, &token).unwrap();
        assert!(report.was_cancelled());
    }
}
