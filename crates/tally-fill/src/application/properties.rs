//! Property tests over randomly masked, internally consistent timelines.

use proptest::prelude::*;

use crate::adapters::InMemoryTimeline;
use crate::application::service::Propagator;
use crate::domain::entities::Record;
use crate::domain::invariants::{preserves_known, recurrence_violations};
use crate::domain::value_objects::{Index, Span};
use crate::ports::inbound::GapFillApi;

const SPAN_POOL: [u32; 6] = [1, 2, 3, 4, 5, 7];

#[derive(Debug, Clone)]
struct Case {
    counts: Vec<i64>,
    spans: Vec<Span>,
    /// Per index: keep the count, then keep each span's total.
    keep: Vec<(bool, Vec<bool>)>,
    target: Index,
}

impl Case {
    fn truth_total(&self, index: usize, span: Span) -> i64 {
        let start = (index + 1).saturating_sub(span.get() as usize);
        self.counts[start..=index].iter().sum()
    }

    fn truth(&self, index: usize) -> Record {
        let mut record = Record::with_count(self.counts[index]);
        for &span in &self.spans {
            record.totals.insert(span, self.truth_total(index, span));
        }
        record
    }

    fn masked_store(&self) -> InMemoryTimeline {
        let mut store = InMemoryTimeline::new();
        for (index, (keep_count, keep_totals)) in self.keep.iter().enumerate() {
            let mut record = Record::unknown();
            if *keep_count {
                record.count = Some(self.counts[index]);
            }
            for (&span, &keep) in self.spans.iter().zip(keep_totals) {
                if keep {
                    record.totals.insert(span, self.truth_total(index, span));
                }
            }
            store = store.with_record(index as Index, record);
        }
        store
    }
}

fn arb_spans() -> impl Strategy<Value = Vec<Span>> {
    proptest::sample::subsequence(SPAN_POOL.to_vec(), 1..=3)
        .prop_map(|lens| lens.into_iter().filter_map(Span::new).collect())
}

fn arb_case() -> impl Strategy<Value = Case> {
    (1usize..24, arb_spans()).prop_flat_map(|(len, spans)| {
        let width = spans.len();
        let keep_one = (any::<bool>(), proptest::collection::vec(any::<bool>(), width));
        let counts = proptest::collection::vec(0i64..20, len);
        let keep = proptest::collection::vec(keep_one, len);
        let parts = (counts, Just(spans), keep, 0..len as Index);
        parts.prop_map(|(counts, spans, keep, target)| Case {
            counts,
            spans,
            keep,
            target,
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: every value known after a run equals the ground truth.
    #[test]
    fn prop_derived_values_match_ground_truth(case in arb_case()) {
        let mut propagator = Propagator::new(case.spans.clone(), case.masked_store());
        propagator.run(case.target).unwrap();

        for (index, record) in propagator.store().iter() {
            let truth = case.truth(index as usize);
            prop_assert!(preserves_known(record, &truth), "index {}: {:?} vs {:?}", index, record, truth);
        }
    }

    /// Property: fields known before the run are unchanged after it.
    #[test]
    fn prop_known_fields_never_overwritten(case in arb_case()) {
        let before = case.masked_store();
        let mut propagator = Propagator::new(case.spans.clone(), before.clone());
        propagator.run(case.target).unwrap();

        for (index, record) in before.iter() {
            let after = propagator.store().record(index).cloned().unwrap_or_default();
            prop_assert!(preserves_known(record, &after));
        }
    }

    /// Property: a second run on the same target changes nothing.
    #[test]
    fn prop_second_run_is_idempotent(case in arb_case()) {
        let mut propagator = Propagator::new(case.spans.clone(), case.masked_store());
        propagator.run(case.target).unwrap();
        let first = propagator.store().clone();

        let report = propagator.run(case.target).unwrap();

        prop_assert_eq!(report.derived(), 0);
        prop_assert_eq!(propagator.store(), &first);
    }

    /// Property: a run on consistent input leaves the recurrence satisfied.
    #[test]
    fn prop_recurrence_holds_after_run(case in arb_case()) {
        let mut propagator = Propagator::new(case.spans.clone(), case.masked_store());
        propagator.run(case.target).unwrap();

        let end = case.counts.len() as Index;
        let violations =
            recurrence_violations(propagator.store(), 0..end, &case.spans).unwrap();
        prop_assert!(violations.is_empty(), "{:?}", violations);
    }

    /// Property: coalescing pending duplicates does not change the fixed point.
    #[test]
    fn prop_coalescing_is_unobservable(case in arb_case()) {
        let mut plain = Propagator::new(case.spans.clone(), case.masked_store());
        let mut coalescing =
            Propagator::new(case.spans.clone(), case.masked_store()).with_coalescing(true);

        let plain_report = plain.run(case.target).unwrap();
        let coalescing_report = coalescing.run(case.target).unwrap();

        prop_assert_eq!(plain.store(), coalescing.store());
        prop_assert_eq!(plain_report.derived(), coalescing_report.derived());
        prop_assert!(coalescing_report.tasks_enqueued <= plain_report.tasks_enqueued);
    }
}
