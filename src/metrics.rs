// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for dnsprep.
//!
//! All metrics carry the `dnsprep_` prefix and live in [`METRICS_REGISTRY`].
//!
//! # Example
//!
//! ```rust,no_run
//! use dnsprep::metrics::{gather_metrics, record_operation_success};
//!
//! record_operation_success("validate", std::time::Duration::from_millis(120));
//! println!("{}", gather_metrics().unwrap());
//! ```

use prometheus::{
    CounterVec, Encoder, HistogramOpts, HistogramVec, IntCounter, Opts, Registry, TextEncoder,
};
use std::sync::LazyLock;
use std::time::Duration;

/// Namespace prefix for all metrics (prometheus-safe)
const METRICS_NAMESPACE: &str = "dnsprep";

/// Global Prometheus metrics registry
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Total number of operations by name and outcome
///
/// Labels:
/// - `operation`: `validate` or `precreate`
/// - `status`: `success`, `skipped` or `error`
pub static OPERATIONS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_operations_total"),
        "Total number of DNS operations by operation and status",
    );
    let counter = CounterVec::new(opts, &["operation", "status"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Duration of operations in seconds
///
/// Labels:
/// - `operation`: `validate` or `precreate`
pub static OPERATION_DURATION_SECONDS: LazyLock<HistogramVec> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_operation_duration_seconds"),
        "Duration of DNS operations in seconds",
    )
    .buckets(vec![0.01, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0]);
    let histogram = HistogramVec::new(opts, &["operation"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .unwrap();
    histogram
});

/// Total number of operation failures by reason
///
/// Labels:
/// - `operation`: `validate` or `precreate`
/// - `reason`: error status reason (e.g., `ZoneNotFound`)
pub static ERRORS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_errors_total"),
        "Total number of DNS operation errors by operation and reason",
    );
    let counter = CounterVec::new(opts, &["operation", "reason"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Total number of placeholder records created
pub static RECORDS_PRECREATED_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    let counter = IntCounter::new(
        format!("{METRICS_NAMESPACE}_records_precreated_total"),
        "Total number of placeholder DNS records created",
    )
    .unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Record a successful operation
pub fn record_operation_success(operation: &str, duration: Duration) {
    OPERATIONS_TOTAL
        .with_label_values(&[operation, "success"])
        .inc();
    OPERATION_DURATION_SECONDS
        .with_label_values(&[operation])
        .observe(duration.as_secs_f64());
}

/// Record an operation short-circuited by policy (private DNS, feature flag)
pub fn record_operation_skipped(operation: &str) {
    OPERATIONS_TOTAL
        .with_label_values(&[operation, "skipped"])
        .inc();
}

/// Record a failed operation
///
/// # Arguments
/// * `operation` - `validate` or `precreate`
/// * `reason` - Error status reason
/// * `duration` - Time spent before failing
pub fn record_operation_error(operation: &str, reason: &str, duration: Duration) {
    OPERATIONS_TOTAL
        .with_label_values(&[operation, "error"])
        .inc();
    ERRORS_TOTAL.with_label_values(&[operation, reason]).inc();
    OPERATION_DURATION_SECONDS
        .with_label_values(&[operation])
        .observe(duration.as_secs_f64());
}

/// Record placeholder records written by one changeset
pub fn record_records_precreated(count: usize) {
    RECORDS_PRECREATED_TOTAL.inc_by(count as u64);
}

/// Gather and encode all metrics in Prometheus text format
///
/// # Errors
/// Returns error if encoding fails
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(format!("UTF-8 error: {e}")))
}
