// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Correlates a sync cycle's change set back to the resources that produced it.
//!
//! A single `DNSEndpoint` commonly contributes many DNS records (one per
//! host/target combination), and one cycle mixes creates, updates, and deletes
//! from many resources. Deduplicating here means the status orchestrator issues
//! one fetch-and-write per *resource* instead of per *record*, and never races
//! against itself on the same resource within a cycle.

use crate::changes::Changes;
use crate::constants::KIND_DNS_ENDPOINT;
use std::collections::HashSet;
use std::fmt;

/// Identity of a `DNSEndpoint` whose status needs updating.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    pub namespace: String,
    pub name: String,
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Collect the distinct `DNSEndpoint` references across all four change buckets.
///
/// Change entries with no resource reference, or a reference to a kind other
/// than `DNSEndpoint` (records sourced from Services, Ingresses, etc. whose
/// status is not ours to report), are skipped silently.
///
/// The returned set carries no ordering guarantee.
#[must_use]
pub fn distinct_resource_refs(changes: &Changes) -> HashSet<ResourceKey> {
    let mut refs = HashSet::new();

    for change in changes.all() {
        let Some(reference) = &change.resource_ref else {
            continue;
        };
        if reference.kind != KIND_DNS_ENDPOINT {
            continue;
        }
        refs.insert(ResourceKey {
            namespace: reference.namespace.clone(),
            name: reference.name.clone(),
        });
    }

    refs
}
