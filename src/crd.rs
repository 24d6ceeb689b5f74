// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Custom Resource Definitions (CRDs) for external DNS synchronization.
//!
//! This module defines the `DNSEndpoint` Custom Resource, the contract between
//! cluster workloads and the dnsync operator: the spec lists the DNS records a
//! resource wants provisioned upstream, and the status reports how far the
//! operator got with them.
//!
//! # Resource Types
//!
//! - [`DNSEndpoint`] - A set of desired DNS records with synchronization status
//!
//! # Example: Creating a DNSEndpoint
//!
//! ```rust,no_run
//! use dnsync::crd::{DNSEndpointSpec, Endpoint};
//!
//! let spec = DNSEndpointSpec {
//!     endpoints: vec![Endpoint {
//!         dns_name: "www.example.com".to_string(),
//!         record_type: "A".to_string(),
//!         targets: vec!["192.0.2.1".to_string()],
//!         record_ttl: Some(300),
//!     }],
//! };
//! ```

use crate::constants::{RECORDS_DISPLAY_SENTINEL, SUPPORTED_RECORD_TYPES};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single desired DNS record.
///
/// An endpoint maps one DNS name to one or more targets of a given record type.
/// Multiple endpoints commonly share a DNS name (e.g. an A and a TXT record for
/// the same host).
///
/// # Example
///
/// ```yaml
/// dnsName: www.example.com
/// recordType: A
/// targets:
///   - 192.0.2.1
///   - 192.0.2.2
/// recordTTL: 300
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Fully qualified DNS name for this record (without trailing dot).
    ///
    /// Examples: "www.example.com", "api.internal.example.com"
    pub dns_name: String,

    /// DNS record type.
    ///
    /// One of: A, AAAA, CNAME, TXT, MX, NS, SRV, PTR.
    pub record_type: String,

    /// Record targets: IP addresses, hostnames, or type-specific payloads.
    ///
    /// At least one target is required.
    pub targets: Vec<String>,

    /// TTL (Time To Live) for this record, in seconds.
    ///
    /// When omitted, the DNS provider's default TTL applies.
    #[serde(default, rename = "recordTTL", skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 2_147_483_647))]
    pub record_ttl: Option<i64>,
}

/// Condition represents an observation of a resource's current state.
///
/// Conditions are used in status subresources to communicate the state of
/// a resource to users and controllers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition. dnsync writes `Accepted` and `Programmed`.
    pub r#type: String,

    /// Status of the condition: True, False, or Unknown.
    pub status: String,

    /// Brief CamelCase reason for the condition's last transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable message indicating details about the transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// The `metadata.generation` this condition was written against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,

    /// Last time the condition transitioned from one status to another (RFC3339 format).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}

/// `DNSEndpoint` status, written exclusively by the dnsync operator.
///
/// Other controllers may attach additional condition types; dnsync never
/// removes or reorders them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DNSEndpointStatus {
    /// Conditions describing acceptance and provider programming state.
    ///
    /// Unique by `type`; ordering is preserved for display.
    #[serde(default)]
    pub conditions: Vec<Condition>,

    /// The `metadata.generation` most recently reconciled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,

    /// Display summary of record provisioning: `"<provisioned>/<total>"`.
    #[serde(default = "default_records_display")]
    pub records: String,

    /// Number of desired records at the last acceptance.
    #[serde(default)]
    pub records_total: i32,

    /// Number of records confirmed provisioned at the DNS provider.
    #[serde(default)]
    pub records_provisioned: i32,

    /// Time of the most recent status write (RFC3339 format).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_status_change: Option<String>,
}

fn default_records_display() -> String {
    RECORDS_DISPLAY_SENTINEL.to_string()
}

impl Default for DNSEndpointStatus {
    fn default() -> Self {
        Self {
            conditions: Vec::new(),
            observed_generation: None,
            records: default_records_display(),
            records_total: 0,
            records_provisioned: 0,
            last_status_change: None,
        }
    }
}

/// `DNSEndpoint` declares DNS records to be synchronized to an external provider.
///
/// Workloads (or higher-level controllers acting on their behalf) create
/// `DNSEndpoint` resources listing the records they need. The dnsync sync
/// engine collects the desired records, applies the difference to the DNS
/// provider, and reports the outcome on this resource's status subresource.
///
/// # Example
///
/// ```yaml
/// apiVersion: dnsync.firestoned.io/v1alpha1
/// kind: DNSEndpoint
/// metadata:
///   name: webapp
///   namespace: production
/// spec:
///   endpoints:
///     - dnsName: www.example.com
///       recordType: A
///       targets:
///         - 192.0.2.1
///       recordTTL: 300
/// ```
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "dnsync.firestoned.io",
    version = "v1alpha1",
    kind = "DNSEndpoint",
    namespaced,
    doc = "DNSEndpoint declares a set of DNS records to be synchronized to an external DNS provider, with synchronization outcome reported in status."
)]
#[kube(status = "DNSEndpointStatus")]
#[serde(rename_all = "camelCase")]
pub struct DNSEndpointSpec {
    /// Desired DNS records, in the order they should be displayed.
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

impl DNSEndpointSpec {
    /// Validate the spec before acceptance.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when any endpoint has an empty DNS name,
    /// an unsupported record type, or no targets.
    pub fn validate(&self) -> Result<(), String> {
        for (i, endpoint) in self.endpoints.iter().enumerate() {
            if endpoint.dns_name.is_empty() {
                return Err(format!("endpoint {i}: dnsName must not be empty"));
            }
            if !SUPPORTED_RECORD_TYPES.contains(&endpoint.record_type.as_str()) {
                return Err(format!(
                    "endpoint {i} ({}): unsupported record type '{}'",
                    endpoint.dns_name, endpoint.record_type
                ));
            }
            if endpoint.targets.is_empty() {
                return Err(format!(
                    "endpoint {i} ({}): at least one target is required",
                    endpoint.dns_name
                ));
            }
        }
        Ok(())
    }
}
