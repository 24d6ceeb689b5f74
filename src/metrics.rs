// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the dnsync operator.
//!
//! This module provides metrics collection with the namespace prefix
//! `dnsync_firestoned_io_` (prometheus-safe version of "dnsync.firestoned.io").
//!
//! # Metrics Categories
//!
//! - **Status Update Metrics** - Track per-resource status write outcomes
//! - **Generation Sync Metrics** - Track observed-generation fast-path writes
//! - **Reconciliation Metrics** - Track controller reconcile passes
//!
//! # Example
//!
//! ```rust,no_run
//! use dnsync::metrics::{record_status_update, METRICS_REGISTRY};
//!
//! // Record a successful status write
//! record_status_update("success");
//! ```

use prometheus::{CounterVec, Encoder, Opts, Registry, TextEncoder};
use std::sync::LazyLock;

/// Namespace prefix for all dnsync metrics (prometheus-safe)
const METRICS_NAMESPACE: &str = "dnsync_firestoned_io";

/// Global Prometheus metrics registry
///
/// All metrics are registered in this registry and exposed via the `/metrics` endpoint.
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Total number of DNSEndpoint status writes by outcome
///
/// Labels:
/// - `outcome`: `success`, `conflict`, `error`, or `fetch_error`
pub static STATUS_UPDATES_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_status_updates_total"),
        "Total number of DNSEndpoint status writes by outcome",
    );
    let counter = CounterVec::new(opts, &["outcome"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Total number of observed-generation fast-path writes by outcome
///
/// Labels:
/// - `outcome`: `success` or `error`
pub static GENERATION_SYNCS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_generation_syncs_total"),
        "Total number of observed-generation status writes by outcome",
    );
    let counter = CounterVec::new(opts, &["outcome"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Total number of DNSEndpoint controller reconciliations by status
///
/// Labels:
/// - `status`: `success` or `error`
pub static RECONCILIATIONS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_reconciliations_total"),
        "Total number of DNSEndpoint reconciliations by status",
    );
    let counter = CounterVec::new(opts, &["status"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Record a status write outcome
pub fn record_status_update(outcome: &str) {
    STATUS_UPDATES_TOTAL.with_label_values(&[outcome]).inc();
}

/// Record an observed-generation fast-path write outcome
pub fn record_generation_sync(outcome: &str) {
    GENERATION_SYNCS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Record a controller reconciliation outcome
pub fn record_reconciliation(status: &str) {
    RECONCILIATIONS_TOTAL.with_label_values(&[status]).inc();
}

/// Gather and encode all metrics in Prometheus text format
///
/// # Returns
/// Prometheus-formatted metrics as a String
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
