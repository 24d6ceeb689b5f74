// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Kubernetes reconciliation controller for `DNSEndpoint` resources.
//!
//! This is the CRD-reading side of the operator: it watches `DNSEndpoint`
//! resources and keeps their admission state current. The writing side (the
//! sync engine reporting provider-apply outcomes via
//! [`StatusUpdater::reconcile`](crate::status_updater::StatusUpdater::reconcile))
//! runs independently of this controller.
//!
//! Each reconcile pass:
//!
//! 1. **Admit** - validate the spec and write `Accepted` (or `Invalid`) when
//!    the spec generation advanced.
//! 2. **Observe** - record `observedGeneration` through the fast path so the
//!    resource's "seen" state is visible before the next sync cycle completes.
//!
//! Both steps are best-effort; a failed status write is retried on the next
//! watch event or requeue rather than surfaced as a reconcile error.

use crate::crd::DNSEndpoint;
use crate::metrics;
use crate::status_updater::StatusUpdater;
use kube::runtime::controller::Action;
use kube::ResourceExt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Shared context passed to the `DNSEndpoint` controller.
#[derive(Clone)]
pub struct Context {
    /// Status orchestrator shared with the sync engine
    pub status: Arc<StatusUpdater>,

    /// Interval between periodic re-reconciles of a settled resource
    pub requeue_interval: Duration,

    /// Requeue delay applied after a reconcile error
    pub error_requeue_interval: Duration,
}

/// Error type for the `DNSEndpoint` reconciler.
///
/// Status writes are best-effort and never produce this; it exists for the
/// controller runtime's signature and for failures in the reconcile machinery
/// itself.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ReconcileError(#[from] anyhow::Error);

/// Reconcile one `DNSEndpoint`.
///
/// # Errors
///
/// Infallible in practice; see [`ReconcileError`].
pub async fn reconcile_dnsendpoint(
    endpoint: Arc<DNSEndpoint>,
    ctx: Arc<Context>,
) -> Result<Action, ReconcileError> {
    let namespace = endpoint.namespace().unwrap_or_default();
    let name = endpoint.name_any();
    debug!(
        "Reconciling DNSEndpoint {}/{} (generation {:?})",
        namespace, name, endpoint.metadata.generation
    );

    // Admission first; the fast path then runs against the freshest version
    // so its replace cannot trip over the admission write's resourceVersion.
    let current = ctx
        .status
        .admit(&endpoint)
        .await
        .unwrap_or_else(|| (*endpoint).clone());

    ctx.status.sync_observed_generation(&current).await;

    metrics::record_reconciliation("success");
    Ok(Action::requeue(ctx.requeue_interval))
}

/// Error policy for the `DNSEndpoint` controller: log and requeue with delay.
pub fn error_policy(
    endpoint: Arc<DNSEndpoint>,
    err: &ReconcileError,
    ctx: Arc<Context>,
) -> Action {
    error!(
        "DNSEndpoint {}/{} reconciliation failed: {}",
        endpoint.namespace().unwrap_or_default(),
        endpoint.name_any(),
        err
    );
    metrics::record_reconciliation("error");
    Action::requeue(ctx.error_requeue_interval)
}
