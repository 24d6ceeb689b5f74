// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Change-set types produced by one DNS synchronization cycle.
//!
//! The diff engine compares desired records against provider-held state and
//! emits four buckets of endpoint-level changes. Each change optionally carries
//! a back-reference to the cluster resource that produced the record, which is
//! what lets the status subsystem report sync outcomes per resource.

use crate::crd::Endpoint;
use serde::{Deserialize, Serialize};

/// Reference to the cluster resource a DNS record originated from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceReference {
    /// Kind of the originating resource (e.g. "DNSEndpoint", "Service").
    pub kind: String,
    /// Namespace of the originating resource.
    pub namespace: String,
    /// Name of the originating resource.
    pub name: String,
    /// UID of the originating resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

/// One endpoint-level change, with its optional originating resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointChange {
    /// The DNS record being created, replaced, or deleted.
    pub endpoint: Endpoint,
    /// The cluster resource this record came from, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_ref: Option<ResourceReference>,
}

impl EndpointChange {
    /// Build a change without an originating-resource reference.
    #[must_use]
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            resource_ref: None,
        }
    }

    /// Build a change carrying an originating-resource reference.
    #[must_use]
    pub fn with_ref(endpoint: Endpoint, resource_ref: ResourceReference) -> Self {
        Self {
            endpoint,
            resource_ref: Some(resource_ref),
        }
    }
}

/// The full change set of one synchronization cycle.
///
/// `update_old`/`update_new` are paired: each superseded record value in
/// `update_old` has its replacement at the same position in `update_new`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Changes {
    /// Records to create at the provider.
    #[serde(default)]
    pub create: Vec<EndpointChange>,
    /// Old values of records being updated.
    #[serde(default)]
    pub update_old: Vec<EndpointChange>,
    /// New values replacing the ones in `update_old`.
    #[serde(default)]
    pub update_new: Vec<EndpointChange>,
    /// Records to delete at the provider.
    #[serde(default)]
    pub delete: Vec<EndpointChange>,
}

impl Changes {
    /// Iterate all change entries across the four buckets.
    pub fn all(&self) -> impl Iterator<Item = &EndpointChange> {
        self.create
            .iter()
            .chain(&self.update_old)
            .chain(&self.update_new)
            .chain(&self.delete)
    }

    /// Whether the cycle produced no changes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.create.is_empty()
            && self.update_old.is_empty()
            && self.update_new.is_empty()
            && self.delete.is_empty()
    }
}
