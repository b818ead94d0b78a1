//! Prometheus metrics for propagation runs.
//!
//! All metrics follow the naming convention: `tally_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, Opts, Registry, TextEncoder,
};
use tally_fill::{PropagationError, RunReport};

use crate::TelemetryError;

lazy_static! {
    /// Crate metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Derivation tasks executed
    pub static ref TASKS_EXECUTED: Counter = Counter::new(
        "tally_tasks_executed_total",
        "Total derivation tasks dequeued and executed"
    ).expect("metric creation failed");

    /// Values derived, by kind
    pub static ref VALUES_DERIVED: CounterVec = CounterVec::new(
        Opts::new("tally_values_derived_total", "Unknown values filled in"),
        &["kind"]  // kind: count/total
    ).expect("metric creation failed");

    /// Failed derivation tasks
    pub static ref TASK_FAILURES: Counter = Counter::new(
        "tally_task_failures_total",
        "Total derivation tasks aborted by a storage error"
    ).expect("metric creation failed");

    /// Enqueues dropped as duplicates of a waiting task
    pub static ref TASKS_COALESCED: Counter = Counter::new(
        "tally_tasks_coalesced_total",
        "Total enqueues dropped because the task was already waiting"
    ).expect("metric creation failed");

    /// Runs by outcome
    pub static ref RUNS: CounterVec = CounterVec::new(
        Opts::new("tally_runs_total", "Propagation runs"),
        &["outcome"]  // outcome: complete/failed/cancelled
    ).expect("metric creation failed");

    /// Tasks executed per run
    pub static ref RUN_TASKS: Histogram = Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "tally_run_tasks",
            "Tasks executed by a single propagation run"
        ).buckets(exponential_buckets(1.0, 2.0, 16).expect("valid buckets"))
    ).expect("metric creation failed");
}

/// Register all metrics with the crate registry. Safe to call more than once.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(TASKS_EXECUTED.clone()),
        Box::new(VALUES_DERIVED.clone()),
        Box::new(TASK_FAILURES.clone()),
        Box::new(TASKS_COALESCED.clone()),
        Box::new(RUNS.clone()),
        Box::new(RUN_TASKS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Outcome label for a run.
pub fn outcome_label(report: &RunReport) -> &'static str {
    if report.was_cancelled() {
        "cancelled"
    } else if report.failed > 0 {
        "failed"
    } else {
        "complete"
    }
}

/// Fold one run report into the metrics.
pub fn record_report(report: &RunReport) {
    TASKS_EXECUTED.inc_by(report.tasks_executed as f64);
    VALUES_DERIVED
        .with_label_values(&["count"])
        .inc_by(report.counts_derived as f64);
    VALUES_DERIVED
        .with_label_values(&["total"])
        .inc_by(report.totals_derived as f64);
    TASK_FAILURES.inc_by(report.failed as f64);
    TASKS_COALESCED.inc_by(report.duplicates_coalesced as f64);
    RUNS.with_label_values(&[outcome_label(report)]).inc();
    RUN_TASKS.observe(report.tasks_executed as f64);
}

/// Record the result of `GapFillApi::run` whether it succeeded or not.
pub fn record_result(result: &Result<RunReport, PropagationError>) {
    match result {
        Ok(report) => record_report(report),
        Err(err) => record_report(&err.report),
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
