// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Condition state machine for `DNSEndpoint` status.
//!
//! Pure, side-effect-free transition functions over [`DNSEndpointStatus`].
//! Nothing in this module performs I/O; callers fetch a resource, apply a
//! transition, and write the result back through a status client.
//!
//! # Condition Format
//!
//! Kubernetes conditions follow a standard format:
//! - `type`: The aspect of the resource being reported (`Accepted`, `Programmed`)
//! - `status`: "True", "False", or "Unknown"
//! - `reason`: A programmatic identifier (CamelCase)
//! - `message`: A human-readable explanation
//! - `lastTransitionTime`: RFC3339 timestamp of the last **status value** change
//!
//! # Timestamp Semantics
//!
//! `lastTransitionTime` moves only when a condition's status value changes;
//! rewriting the same value with a new reason or message preserves the prior
//! timestamp. `lastStatusChange` on the enclosing status moves on every write.

use crate::crd::{Condition, DNSEndpoint, DNSEndpointStatus};
use crate::status_reasons::{
    CONDITION_TYPE_ACCEPTED, CONDITION_TYPE_PROGRAMMED, REASON_ACCEPTED, REASON_FAILED,
    REASON_INVALID, REASON_PENDING, REASON_PROGRAMMED, STATUS_FALSE, STATUS_TRUE, STATUS_UNKNOWN,
};
use chrono::Utc;

/// Message used when `Programmed` is forced back to `Unknown` at acceptance.
const PENDING_MESSAGE: &str = "Awaiting DNS record synchronization";

/// Format the records display string: `"<provisioned>/<total>"`.
#[must_use]
pub fn records_display(provisioned: i32, total: i32) -> String {
    format!("{provisioned}/{total}")
}

/// Find a condition by type in a list of conditions.
///
/// # Example
///
/// ```rust,no_run
/// # use dnsync::conditions::find_condition;
/// # use dnsync::crd::Condition;
/// let conditions: Vec<Condition> = vec![]; // From resource status
/// if let Some(programmed) = find_condition(&conditions, "Programmed") {
///     println!("Programmed status: {}", programmed.status);
/// }
/// ```
#[must_use]
pub fn find_condition<'a>(
    conditions: &'a [Condition],
    condition_type: &str,
) -> Option<&'a Condition> {
    conditions.iter().find(|c| c.r#type == condition_type)
}

/// Set or replace a condition in the status, preserving transition timestamps.
///
/// The conditions list acts as an association list keyed by `type`: an existing
/// entry is replaced in place (list order preserved, so condition types written
/// by other controllers keep their positions), a new entry is appended.
///
/// `lastTransitionTime` is computed by comparing the old and new status values:
/// unchanged value copies the prior timestamp, a changed value is stamped with
/// the current time. `lastStatusChange` on the status is stamped with the
/// current time on every call, whether or not any condition value changed.
pub fn upsert_condition(
    status: &mut DNSEndpointStatus,
    condition_type: &str,
    value: &str,
    reason: &str,
    message: &str,
    observed_generation: Option<i64>,
) {
    let now = Utc::now().to_rfc3339();

    if let Some(existing) = status
        .conditions
        .iter_mut()
        .find(|c| c.r#type == condition_type)
    {
        // Preserve lastTransitionTime if the status value hasn't changed
        let last_transition_time = if existing.status == value {
            existing
                .last_transition_time
                .clone()
                .unwrap_or_else(|| now.clone())
        } else {
            now.clone()
        };

        existing.status = value.to_string();
        existing.reason = Some(reason.to_string());
        existing.message = Some(message.to_string());
        existing.observed_generation = observed_generation;
        existing.last_transition_time = Some(last_transition_time);
    } else {
        status.conditions.push(Condition {
            r#type: condition_type.to_string(),
            status: value.to_string(),
            reason: Some(reason.to_string()),
            message: Some(message.to_string()),
            observed_generation,
            last_transition_time: Some(now.clone()),
        });
    }

    status.last_status_change = Some(now);
}

/// Mark a `DNSEndpoint` as accepted for synchronization.
///
/// Writes `Accepted = True` and recomputes the record totals from the current
/// spec. The provisioned count is preserved across spec changes, except when
/// the records display still carries the uninitialized `"0/0"` sentinel, in
/// which case it resets to zero so a freshly observed resource can never show
/// stale provisioned counts.
///
/// When the provisioned count no longer matches the new total, `Programmed` is
/// forced back to `Unknown`/`Pending`; when the counts already agree (a spec
/// change that kept the same number of records), `Programmed` is left alone.
pub fn set_accepted(endpoint: &mut DNSEndpoint, message: &str) {
    let total = i32::try_from(endpoint.spec.endpoints.len()).unwrap_or(i32::MAX);
    let generation = endpoint.metadata.generation;
    let status = endpoint.status.get_or_insert_with(DNSEndpointStatus::default);

    if status.records == crate::constants::RECORDS_DISPLAY_SENTINEL {
        status.records_provisioned = 0;
    }
    status.records_total = total;
    status.records = records_display(status.records_provisioned, total);

    upsert_condition(
        status,
        CONDITION_TYPE_ACCEPTED,
        STATUS_TRUE,
        REASON_ACCEPTED,
        message,
        generation,
    );

    if status.records_provisioned != status.records_total {
        upsert_condition(
            status,
            CONDITION_TYPE_PROGRAMMED,
            STATUS_UNKNOWN,
            REASON_PENDING,
            PENDING_MESSAGE,
            generation,
        );
    }
}

/// Mark a `DNSEndpoint`'s records as fully programmed at the DNS provider.
///
/// Writes `Programmed = True`, sets both record counts to the current number
/// of spec endpoints, and records the reconciled generation in
/// `observedGeneration`.
pub fn set_programmed(endpoint: &mut DNSEndpoint, message: &str) {
    let total = i32::try_from(endpoint.spec.endpoints.len()).unwrap_or(i32::MAX);
    let generation = endpoint.metadata.generation;
    let status = endpoint.status.get_or_insert_with(DNSEndpointStatus::default);

    status.records_total = total;
    status.records_provisioned = total;
    status.records = records_display(total, total);
    status.observed_generation = generation;

    upsert_condition(
        status,
        CONDITION_TYPE_PROGRAMMED,
        STATUS_TRUE,
        REASON_PROGRAMMED,
        message,
        generation,
    );
}

/// Mark a `DNSEndpoint`'s synchronization cycle as failed.
///
/// Writes `Programmed = False`/`Failed`. Record counts are left untouched: a
/// partially applied cycle legitimately shows partial progress (e.g. `"2/5"`),
/// and a fully failed one keeps the counts from the last successful cycle.
pub fn set_failed(endpoint: &mut DNSEndpoint, message: &str) {
    let generation = endpoint.metadata.generation;
    let status = endpoint.status.get_or_insert_with(DNSEndpointStatus::default);

    upsert_condition(
        status,
        CONDITION_TYPE_PROGRAMMED,
        STATUS_FALSE,
        REASON_FAILED,
        message,
        generation,
    );
}

/// Mark a `DNSEndpoint`'s spec as invalid.
///
/// Writes `Accepted = False`/`Invalid`. The resource is excluded from
/// synchronization until its spec changes; record counts and any existing
/// `Programmed` condition are left as the last valid spec left them.
pub fn set_invalid(endpoint: &mut DNSEndpoint, message: &str) {
    let generation = endpoint.metadata.generation;
    let status = endpoint.status.get_or_insert_with(DNSEndpointStatus::default);

    upsert_condition(
        status,
        CONDITION_TYPE_ACCEPTED,
        STATUS_FALSE,
        REASON_INVALID,
        message,
        generation,
    );
}
