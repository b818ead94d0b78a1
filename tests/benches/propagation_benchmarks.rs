//! # Tally Propagation Benchmarks
//!
//! | Workload | Shape |
//! |----------|-------|
//! | Forward cascade | counts known, totals seeded at index 0 |
//! | Backward cascade | totals known, counts known for the last 30 indices |
//! | Dense masking | spans 1..=8, 60% of fields kept |

use criterion::{criterion_group, criterion_main};
use tally_tests::benchmarks::propagation::{
    bench_backward_cascade, bench_dense_masked, bench_forward_cascade,
};

criterion_group!(
    benches,
    bench_forward_cascade,
    bench_backward_cascade,
    bench_dense_masked,
);

criterion_main!(benches);
