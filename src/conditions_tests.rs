// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `conditions.rs`

#[cfg(test)]
mod tests {
    use crate::conditions::{
        find_condition, records_display, set_accepted, set_failed, set_invalid, set_programmed,
        upsert_condition,
    };
    use crate::crd::{Condition, DNSEndpoint, DNSEndpointSpec, DNSEndpointStatus, Endpoint};
    use crate::status_reasons::{
        CONDITION_TYPE_ACCEPTED, CONDITION_TYPE_PROGRAMMED, REASON_ACCEPTED, REASON_FAILED,
        REASON_INVALID, REASON_PENDING, REASON_PROGRAMMED, STATUS_FALSE, STATUS_TRUE,
        STATUS_UNKNOWN,
    };

    const T0: &str = "2020-01-01T00:00:00+00:00";

    fn make_endpoint(record_count: usize, generation: i64) -> DNSEndpoint {
        let endpoints = (0..record_count)
            .map(|i| Endpoint {
                dns_name: format!("host-{i}.example.com"),
                record_type: "A".to_string(),
                targets: vec![format!("192.0.2.{}", i + 1)],
                record_ttl: Some(300),
            })
            .collect();

        let mut endpoint = DNSEndpoint::new("webapp", DNSEndpointSpec { endpoints });
        endpoint.metadata.namespace = Some("production".to_string());
        endpoint.metadata.generation = Some(generation);
        endpoint
    }

    fn condition<'a>(endpoint: &'a DNSEndpoint, condition_type: &str) -> &'a Condition {
        find_condition(
            &endpoint.status.as_ref().expect("status").conditions,
            condition_type,
        )
        .unwrap_or_else(|| panic!("condition {condition_type} missing"))
    }

    // ========================================================================
    // upsert_condition primitive
    // ========================================================================

    #[test]
    fn test_upsert_appends_new_condition() {
        let mut status = DNSEndpointStatus::default();

        upsert_condition(
            &mut status,
            CONDITION_TYPE_PROGRAMMED,
            STATUS_UNKNOWN,
            REASON_PENDING,
            "waiting",
            Some(1),
        );

        assert_eq!(status.conditions.len(), 1);
        let cond = &status.conditions[0];
        assert_eq!(cond.r#type, CONDITION_TYPE_PROGRAMMED);
        assert_eq!(cond.status, STATUS_UNKNOWN);
        assert_eq!(cond.reason, Some(REASON_PENDING.to_string()));
        assert_eq!(cond.observed_generation, Some(1));
        assert!(cond.last_transition_time.is_some());
        assert!(status.last_status_change.is_some());
    }

    #[test]
    fn test_upsert_preserves_timestamp_on_unchanged_status() {
        // Re-applying the same status value keeps lastTransitionTime
        let mut status = DNSEndpointStatus::default();
        upsert_condition(
            &mut status,
            CONDITION_TYPE_PROGRAMMED,
            STATUS_TRUE,
            REASON_PROGRAMMED,
            "ok",
            Some(1),
        );
        status.conditions[0].last_transition_time = Some(T0.to_string());

        upsert_condition(
            &mut status,
            CONDITION_TYPE_PROGRAMMED,
            STATUS_TRUE,
            REASON_PROGRAMMED,
            "still ok",
            Some(2),
        );

        let cond = &status.conditions[0];
        assert_eq!(cond.last_transition_time, Some(T0.to_string()));
        assert_eq!(cond.message, Some("still ok".to_string()));
        assert_eq!(cond.observed_generation, Some(2));
    }

    #[test]
    fn test_upsert_stamps_timestamp_on_changed_status() {
        // A changed status value moves lastTransitionTime
        let mut status = DNSEndpointStatus::default();
        upsert_condition(
            &mut status,
            CONDITION_TYPE_PROGRAMMED,
            STATUS_TRUE,
            REASON_PROGRAMMED,
            "ok",
            Some(1),
        );
        status.conditions[0].last_transition_time = Some(T0.to_string());

        upsert_condition(
            &mut status,
            CONDITION_TYPE_PROGRAMMED,
            STATUS_FALSE,
            REASON_FAILED,
            "provider timeout",
            Some(1),
        );

        let cond = &status.conditions[0];
        assert_ne!(cond.last_transition_time, Some(T0.to_string()));
        assert_eq!(cond.status, STATUS_FALSE);
    }

    #[test]
    fn test_upsert_updates_last_status_change_on_every_write() {
        // lastStatusChange moves even when the condition value does not
        let mut status = DNSEndpointStatus::default();
        upsert_condition(
            &mut status,
            CONDITION_TYPE_PROGRAMMED,
            STATUS_TRUE,
            REASON_PROGRAMMED,
            "ok",
            Some(1),
        );
        status.last_status_change = Some(T0.to_string());

        upsert_condition(
            &mut status,
            CONDITION_TYPE_PROGRAMMED,
            STATUS_TRUE,
            REASON_PROGRAMMED,
            "ok again",
            Some(1),
        );

        assert_ne!(status.last_status_change, Some(T0.to_string()));
    }

    #[test]
    fn test_upsert_preserves_foreign_conditions_and_order() {
        // Conditions written by other controllers keep their entries and positions
        let mut status = DNSEndpointStatus::default();
        status.conditions.push(Condition {
            r#type: "Ready".to_string(),
            status: STATUS_TRUE.to_string(),
            reason: Some("External".to_string()),
            message: None,
            observed_generation: None,
            last_transition_time: Some(T0.to_string()),
        });

        upsert_condition(
            &mut status,
            CONDITION_TYPE_ACCEPTED,
            STATUS_TRUE,
            REASON_ACCEPTED,
            "accepted",
            Some(1),
        );
        upsert_condition(
            &mut status,
            CONDITION_TYPE_ACCEPTED,
            STATUS_TRUE,
            REASON_ACCEPTED,
            "accepted again",
            Some(2),
        );

        assert_eq!(status.conditions.len(), 2);
        assert_eq!(status.conditions[0].r#type, "Ready");
        assert_eq!(status.conditions[0].last_transition_time, Some(T0.to_string()));
        assert_eq!(status.conditions[1].r#type, CONDITION_TYPE_ACCEPTED);
    }

    // ========================================================================
    // set_accepted
    // ========================================================================

    #[test]
    fn test_set_accepted_on_fresh_resource() {
        // 3 endpoints, status never initialized
        let mut endpoint = make_endpoint(3, 1);

        set_accepted(&mut endpoint, "3 DNS records accepted");

        let status = endpoint.status.as_ref().expect("status");
        assert_eq!(status.records, "0/3");
        assert_eq!(status.records_provisioned, 0);
        assert_eq!(status.records_total, 3);

        let accepted = condition(&endpoint, CONDITION_TYPE_ACCEPTED);
        assert_eq!(accepted.status, STATUS_TRUE);
        assert_eq!(accepted.reason, Some(REASON_ACCEPTED.to_string()));

        let programmed = condition(&endpoint, CONDITION_TYPE_PROGRAMMED);
        assert_eq!(programmed.status, STATUS_UNKNOWN);
        assert_eq!(programmed.reason, Some(REASON_PENDING.to_string()));
    }

    #[test]
    fn test_set_accepted_resets_stale_counts_behind_sentinel() {
        // A "0/0" display wins over a stale provisioned counter
        let mut endpoint = make_endpoint(2, 3);
        endpoint.status = Some(DNSEndpointStatus {
            records_provisioned: 7,
            ..DNSEndpointStatus::default()
        });

        set_accepted(&mut endpoint, "accepted");

        let status = endpoint.status.as_ref().expect("status");
        assert_eq!(status.records_provisioned, 0);
        assert_eq!(status.records, "0/2");
    }

    #[test]
    fn test_set_accepted_preserves_partial_counts() {
        let mut endpoint = make_endpoint(5, 2);
        endpoint.status = Some(DNSEndpointStatus {
            records: records_display(2, 5),
            records_total: 5,
            records_provisioned: 2,
            ..DNSEndpointStatus::default()
        });

        set_accepted(&mut endpoint, "accepted");

        let status = endpoint.status.as_ref().expect("status");
        assert_eq!(status.records_provisioned, 2);
        assert_eq!(status.records, "2/5");

        let programmed = condition(&endpoint, CONDITION_TYPE_PROGRAMMED);
        assert_eq!(programmed.status, STATUS_UNKNOWN);
        assert_eq!(programmed.reason, Some(REASON_PENDING.to_string()));
    }

    #[test]
    fn test_set_accepted_leaves_programmed_alone_when_counts_match() {
        // A spec change that kept the record count does not regress Programmed
        let mut endpoint = make_endpoint(3, 4);
        set_programmed(&mut endpoint, "ok");
        let t_programmed = condition(&endpoint, CONDITION_TYPE_PROGRAMMED)
            .last_transition_time
            .clone();

        set_accepted(&mut endpoint, "re-accepted after spec change");

        let programmed = condition(&endpoint, CONDITION_TYPE_PROGRAMMED);
        assert_eq!(programmed.status, STATUS_TRUE);
        assert_eq!(programmed.last_transition_time, t_programmed);
    }

    // ========================================================================
    // set_programmed
    // ========================================================================

    #[test]
    fn test_set_programmed_counts_and_generation() {
        // Counts and display reflect a fully programmed spec
        let mut endpoint = make_endpoint(3, 2);
        set_accepted(&mut endpoint, "accepted");

        set_programmed(&mut endpoint, "ok");

        let status = endpoint.status.as_ref().expect("status");
        assert_eq!(status.records, "3/3");
        assert_eq!(status.records_total, 3);
        assert_eq!(status.records_provisioned, 3);
        assert_eq!(status.observed_generation, Some(2));

        let programmed = condition(&endpoint, CONDITION_TYPE_PROGRAMMED);
        assert_eq!(programmed.status, STATUS_TRUE);
        assert_eq!(programmed.reason, Some(REASON_PROGRAMMED.to_string()));
    }

    #[test]
    fn test_set_programmed_repeat_preserves_transition_time() {
        // Programmed already True at T0
        let mut endpoint = make_endpoint(3, 2);
        set_programmed(&mut endpoint, "ok");
        {
            let status = endpoint.status.as_mut().expect("status");
            status
                .conditions
                .iter_mut()
                .find(|c| c.r#type == CONDITION_TYPE_PROGRAMMED)
                .expect("programmed")
                .last_transition_time = Some(T0.to_string());
            status.last_status_change = Some(T0.to_string());
        }

        set_programmed(&mut endpoint, "still ok");

        let programmed = condition(&endpoint, CONDITION_TYPE_PROGRAMMED);
        assert_eq!(programmed.last_transition_time, Some(T0.to_string()));
        assert_eq!(programmed.message, Some("still ok".to_string()));

        let status = endpoint.status.as_ref().expect("status");
        assert_ne!(status.last_status_change, Some(T0.to_string()));
    }

    #[test]
    fn test_programmed_reenters_true_after_failure() {
        // True -> False -> True is a normal oscillation
        let mut endpoint = make_endpoint(2, 1);
        set_programmed(&mut endpoint, "ok");
        set_failed(&mut endpoint, "provider timeout");
        assert_eq!(
            condition(&endpoint, CONDITION_TYPE_PROGRAMMED).status,
            STATUS_FALSE
        );

        set_programmed(&mut endpoint, "recovered");

        let programmed = condition(&endpoint, CONDITION_TYPE_PROGRAMMED);
        assert_eq!(programmed.status, STATUS_TRUE);
        assert_eq!(programmed.reason, Some(REASON_PROGRAMMED.to_string()));
    }

    // ========================================================================
    // set_failed
    // ========================================================================

    #[test]
    fn test_set_failed_preserves_counts() {
        // Partial counts survive a failed cycle
        let mut endpoint = make_endpoint(5, 2);
        endpoint.status = Some(DNSEndpointStatus {
            records: records_display(2, 5),
            records_total: 5,
            records_provisioned: 2,
            ..DNSEndpointStatus::default()
        });

        set_failed(&mut endpoint, "timeout");

        let status = endpoint.status.as_ref().expect("status");
        assert_eq!(status.records, "2/5");
        assert_eq!(status.records_total, 5);
        assert_eq!(status.records_provisioned, 2);

        let programmed = condition(&endpoint, CONDITION_TYPE_PROGRAMMED);
        assert_eq!(programmed.status, STATUS_FALSE);
        assert_eq!(programmed.reason, Some(REASON_FAILED.to_string()));
        assert_eq!(programmed.message, Some("timeout".to_string()));
    }

    #[test]
    fn test_set_failed_does_not_touch_observed_generation() {
        let mut endpoint = make_endpoint(2, 5);
        endpoint.status = Some(DNSEndpointStatus {
            observed_generation: Some(4),
            ..DNSEndpointStatus::default()
        });

        set_failed(&mut endpoint, "timeout");

        assert_eq!(
            endpoint.status.as_ref().expect("status").observed_generation,
            Some(4)
        );
    }

    // ========================================================================
    // set_invalid
    // ========================================================================

    #[test]
    fn test_set_invalid_reports_rejection() {
        let mut endpoint = make_endpoint(1, 1);

        set_invalid(&mut endpoint, "endpoint 0: dnsName must not be empty");

        let accepted = condition(&endpoint, CONDITION_TYPE_ACCEPTED);
        assert_eq!(accepted.status, STATUS_FALSE);
        assert_eq!(accepted.reason, Some(REASON_INVALID.to_string()));
        // Record counts are untouched for an invalid spec
        let status = endpoint.status.as_ref().expect("status");
        assert_eq!(status.records, "0/0");
        assert_eq!(status.records_total, 0);
    }

    #[test]
    fn test_records_display() {
        assert_eq!(records_display(0, 0), "0/0");
        assert_eq!(records_display(2, 5), "2/5");
        assert_eq!(records_display(3, 3), "3/3");
    }
}
