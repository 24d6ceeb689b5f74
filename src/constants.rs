// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the dnsync operator.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// API Constants
// ============================================================================

/// API group for the dnsync CRDs
pub const API_GROUP: &str = "dnsync.firestoned.io";

/// API version for the dnsync CRDs
pub const API_VERSION: &str = "v1alpha1";

/// Fully qualified API version (group/version)
pub const API_GROUP_VERSION: &str = "dnsync.firestoned.io/v1alpha1";

/// Kind name for the `DNSEndpoint` resource
pub const KIND_DNS_ENDPOINT: &str = "DNSEndpoint";

/// Plural resource name for `DNSEndpoint`, as it appears in API URL paths
pub const PLURAL_DNS_ENDPOINTS: &str = "dnsendpoints";

// ============================================================================
// Status Constants
// ============================================================================

/// Records display value for a status that has never been reconciled.
///
/// A status carrying this sentinel is treated as uninitialized: stale
/// provisioned counters are reset to zero on the next acceptance.
pub const RECORDS_DISPLAY_SENTINEL: &str = "0/0";

// ============================================================================
// DNS Record Types
// ============================================================================

/// Record types accepted in `spec.endpoints`
pub const SUPPORTED_RECORD_TYPES: &[&str] =
    &["A", "AAAA", "CNAME", "TXT", "MX", "NS", "SRV", "PTR"];

// ============================================================================
// Controller Defaults
// ============================================================================

/// Default requeue interval for the `DNSEndpoint` controller, in seconds
pub const DEFAULT_REQUEUE_SECONDS: u64 = 300;

/// Requeue interval after a reconciliation error, in seconds
pub const ERROR_REQUEUE_SECONDS: u64 = 30;

/// Default bind address for the metrics and health endpoint server
pub const DEFAULT_METRICS_ADDR: &str = "0.0.0.0:8080";
