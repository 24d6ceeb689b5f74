// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Kubernetes Event creation for `DNSEndpoint` condition transitions.

use crate::crd::DNSEndpoint;
use k8s_openapi::api::core::v1::{Event, ObjectReference};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};
use kube::api::PostParams;
use kube::{Api, Client, Resource, ResourceExt};
use tracing::warn;

/// Record an Event against a `DNSEndpoint` for `kubectl describe` visibility.
///
/// Best-effort: a failed Event write is logged and swallowed so it can never
/// fail the status update it accompanies.
pub async fn record_event(
    client: &Client,
    endpoint: &DNSEndpoint,
    event_type: &str,
    reason: &str,
    message: &str,
) {
    let namespace = endpoint.namespace().unwrap_or_default();
    let name = endpoint.name_any();
    let event_api: Api<Event> = Api::namespaced(client.clone(), &namespace);

    let now = Time(k8s_openapi::jiff::Timestamp::now());
    let event = Event {
        metadata: ObjectMeta {
            generate_name: Some(format!("{name}-")),
            namespace: Some(namespace.clone()),
            ..Default::default()
        },
        involved_object: ObjectReference {
            api_version: Some(DNSEndpoint::api_version(&()).to_string()),
            kind: Some(DNSEndpoint::kind(&()).to_string()),
            name: Some(name.clone()),
            namespace: Some(namespace),
            uid: endpoint.meta().uid.clone(),
            ..Default::default()
        },
        reason: Some(reason.to_string()),
        message: Some(message.to_string()),
        type_: Some(event_type.to_string()),
        first_timestamp: Some(now.clone()),
        last_timestamp: Some(now),
        count: Some(1),
        ..Default::default()
    };

    if let Err(e) = event_api.create(&PostParams::default(), &event).await {
        warn!("Failed to create event for {}: {}", name, e);
    }
}
