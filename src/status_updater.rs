// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Status sync orchestrator for `DNSEndpoint` resources.
//!
//! One [`StatusUpdater`] ties the whole status subsystem together: after a DNS
//! synchronization cycle finishes applying changes at the provider, the sync
//! engine calls [`StatusUpdater::reconcile`] with the cycle's change set and
//! overall verdict, and every `DNSEndpoint` that contributed a record gets one
//! fetch-transition-write pass.
//!
//! # Error Policy
//!
//! Everything here is best-effort and per-resource: a fetch or write failure
//! (including an optimistic-concurrency conflict from another writer) is
//! logged as a warning and the resource is skipped for this cycle. The next
//! cycle re-fetches the latest version and replays the transition, which is
//! safe because the transition functions are pure and idempotent with respect
//! to the resource's current state. No error ever propagates to, or can
//! abort, the caller's sync loop.

use crate::changes::Changes;
use crate::conditions::{find_condition, set_accepted, set_failed, set_invalid, set_programmed};
use crate::correlator::{distinct_resource_refs, ResourceKey};
use crate::crd::{DNSEndpoint, DNSEndpointStatus};
use crate::events::record_event;
use crate::metrics;
use crate::status_client::StatusClient;
use crate::status_reasons::{
    CONDITION_TYPE_ACCEPTED, REASON_ACCEPTED, REASON_FAILED, REASON_INVALID, REASON_PROGRAMMED,
    STATUS_FALSE, STATUS_TRUE,
};
use chrono::Utc;
use kube::{Client, ResourceExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Orchestrates status updates for one DNS synchronization cycle.
///
/// The transport behind the status writes is injected at construction time as
/// a [`StatusClient`]; orchestration logic never branches on transport.
///
/// # Example
///
/// ```rust,no_run
/// use dnsync::status_client::api::ApiStatusClient;
/// use dnsync::status_updater::StatusUpdater;
/// use std::sync::Arc;
///
/// async fn build(client: kube::Client) -> StatusUpdater {
///     StatusUpdater::new(Arc::new(ApiStatusClient::new(client.clone())))
///         .with_event_recorder(client)
/// }
/// ```
pub struct StatusUpdater {
    status_client: Arc<dyn StatusClient>,
    event_client: Option<Client>,
}

impl StatusUpdater {
    /// Create a new orchestrator over the given status client.
    #[must_use]
    pub fn new(status_client: Arc<dyn StatusClient>) -> Self {
        Self {
            status_client,
            event_client: None,
        }
    }

    /// Additionally record a Kubernetes Event for each condition written.
    #[must_use]
    pub fn with_event_recorder(mut self, client: Client) -> Self {
        self.event_client = Some(client);
        self
    }

    /// Report a finished sync cycle's outcome onto every `DNSEndpoint` that
    /// contributed a record to it.
    ///
    /// Correlates the change set back to distinct resources, then runs one
    /// fetch-transition-write pass per resource: `Programmed = True` when the
    /// provider apply fully succeeded, `Programmed = False`/`Failed` otherwise.
    ///
    /// Called exactly once per sync cycle, after the provider-apply step.
    /// Never returns an error; all failures are per-resource and logged.
    pub async fn reconcile(&self, changes: &Changes, success: bool, message: &str) {
        let refs = distinct_resource_refs(changes);
        if refs.is_empty() {
            debug!("Sync cycle produced no DNSEndpoint-backed changes, nothing to report");
            return;
        }

        debug!(
            resources = refs.len(),
            success, "Reporting sync outcome to DNSEndpoint resources"
        );

        for key in &refs {
            self.reconcile_one(key, success, message).await;
        }
    }

    async fn reconcile_one(&self, key: &ResourceKey, success: bool, message: &str) {
        let mut endpoint = match self.status_client.get(&key.namespace, &key.name).await {
            Ok(endpoint) => endpoint,
            Err(err) => {
                warn!(
                    resource = %key,
                    error = %err,
                    "Failed to fetch DNSEndpoint for status update, skipping"
                );
                metrics::record_status_update("fetch_error");
                return;
            }
        };

        let (event_type, reason) = if success {
            set_programmed(&mut endpoint, message);
            ("Normal", REASON_PROGRAMMED)
        } else {
            set_failed(&mut endpoint, message);
            ("Warning", REASON_FAILED)
        };

        match self.status_client.update_status(&endpoint).await {
            Ok(_) => {
                info!(resource = %key, success, "Updated DNSEndpoint sync status");
                metrics::record_status_update("success");
                if let Some(client) = &self.event_client {
                    record_event(client, &endpoint, event_type, reason, message).await;
                }
            }
            Err(err) if err.is_conflict() => {
                warn!(
                    resource = %key,
                    error = %err,
                    "Status write lost to a concurrent writer, will retry next cycle"
                );
                metrics::record_status_update("conflict");
            }
            Err(err) => {
                warn!(
                    resource = %key,
                    error = %err,
                    "Failed to write DNSEndpoint status, skipping"
                );
                metrics::record_status_update("error");
            }
        }
    }

    /// Admit a new or changed `DNSEndpoint` spec.
    ///
    /// Validates the spec and writes `Accepted = True` (recomputing record
    /// totals and, when counts no longer match, regressing `Programmed` to
    /// `Pending`), or `Accepted = False`/`Invalid` when validation fails.
    /// Skips the write when the `Accepted` condition already reflects the
    /// current generation, so replayed watch events settle without API calls.
    ///
    /// Returns the updated resource when a write landed, `None` when the
    /// write was skipped or failed.
    pub async fn admit(&self, endpoint: &DNSEndpoint) -> Option<DNSEndpoint> {
        let generation = endpoint.metadata.generation;

        match endpoint.spec.validate() {
            Err(reason) => {
                if accepted_reflects(endpoint, STATUS_FALSE, generation) {
                    return None;
                }
                let mut updated = endpoint.clone();
                set_invalid(&mut updated, &reason);
                self.write_admission(updated, "Warning", REASON_INVALID, &reason)
                    .await
            }
            Ok(()) => {
                if accepted_reflects(endpoint, STATUS_TRUE, generation) {
                    return None;
                }
                let message = format!(
                    "{} DNS records accepted for synchronization",
                    endpoint.spec.endpoints.len()
                );
                let mut updated = endpoint.clone();
                set_accepted(&mut updated, &message);
                self.write_admission(updated, "Normal", REASON_ACCEPTED, &message)
                    .await
            }
        }
    }

    async fn write_admission(
        &self,
        endpoint: DNSEndpoint,
        event_type: &str,
        reason: &str,
        message: &str,
    ) -> Option<DNSEndpoint> {
        let namespace = endpoint.namespace().unwrap_or_default();
        let name = endpoint.name_any();

        match self.status_client.update_status(&endpoint).await {
            Ok(updated) => {
                info!("Updated DNSEndpoint {namespace}/{name} admission status: {reason}");
                metrics::record_status_update("success");
                if let Some(client) = &self.event_client {
                    record_event(client, &endpoint, event_type, reason, message).await;
                }
                Some(updated)
            }
            Err(err) => {
                warn!("Failed to write DNSEndpoint {namespace}/{name} admission status, skipping: {err}");
                metrics::record_status_update(if err.is_conflict() { "conflict" } else { "error" });
                None
            }
        }
    }

    /// Fast-path write of `observedGeneration` alone.
    ///
    /// Used by the CRD-reading side after collecting a resource's records for
    /// diffing: makes the "seen" state visible immediately, without waiting
    /// for the cycle's provider apply. Conditions are left untouched. Skips
    /// entirely when the status already reflects the current generation, so a
    /// resource is never written twice for the same generation.
    pub async fn sync_observed_generation(&self, endpoint: &DNSEndpoint) {
        let namespace = endpoint.namespace().unwrap_or_default();
        let name = endpoint.name_any();
        let generation = endpoint.metadata.generation;
        let observed = endpoint.status.as_ref().and_then(|s| s.observed_generation);

        if observed == generation {
            debug!("DNSEndpoint {namespace}/{name} generation already observed, skipping status write");
            return;
        }

        let mut updated = endpoint.clone();
        let status = updated.status.get_or_insert_with(DNSEndpointStatus::default);
        status.observed_generation = generation;
        status.last_status_change = Some(Utc::now().to_rfc3339());

        match self.status_client.update_status(&updated).await {
            Ok(_) => {
                debug!(
                    "Recorded observed generation {:?} for DNSEndpoint {namespace}/{name}",
                    generation
                );
                metrics::record_generation_sync("success");
            }
            Err(err) => {
                warn!(
                    "Failed to record observed generation for DNSEndpoint {namespace}/{name}, skipping: {err}"
                );
                metrics::record_generation_sync("error");
            }
        }
    }
}

/// Whether the `Accepted` condition already carries the given status value for
/// the given generation.
fn accepted_reflects(endpoint: &DNSEndpoint, value: &str, generation: Option<i64>) -> bool {
    endpoint
        .status
        .as_ref()
        .and_then(|status| find_condition(&status.conditions, CONDITION_TYPE_ACCEPTED))
        .is_some_and(|condition| {
            condition.status == value && condition.observed_generation == generation
        })
}
