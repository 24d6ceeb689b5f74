// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Standard Kubernetes status condition types and reasons for `DNSEndpoint` resources.
//!
//! This module defines constants for condition reasons following Kubernetes conventions.
//! Reasons are programmatic identifiers in CamelCase that explain why a condition has
//! a particular status.
//!
//! # Condition Types
//!
//! dnsync writes exactly two condition types:
//!
//! - **`Accepted`** - the resource's spec was admitted for synchronization.
//!   Moves from `Unknown` to `True` and never to `False` in normal operation;
//!   a spec that fails validation is reported as `False` with reason `Invalid`.
//! - **`Programmed`** - the resource's records were applied at the DNS provider.
//!   Oscillates between `True` and `False` across sync cycles; re-entering
//!   `True` after a failed cycle is a normal transition.
//!
//! # Example Status
//!
//! ```yaml
//! status:
//!   observedGeneration: 4
//!   records: "3/3"
//!   conditions:
//!     - type: Accepted
//!       status: "True"
//!       reason: Accepted
//!       message: "3 DNS records accepted for synchronization"
//!     - type: Programmed
//!       status: "True"
//!       reason: Programmed
//!       message: "All records applied to the DNS provider"
//! ```

// ============================================================================
// Condition Types
// ============================================================================

/// Condition type reporting spec admission.
pub const CONDITION_TYPE_ACCEPTED: &str = "Accepted";

/// Condition type reporting DNS provider programming.
pub const CONDITION_TYPE_PROGRAMMED: &str = "Programmed";

// ============================================================================
// Condition Status Values
// ============================================================================

/// Condition status value "True"
pub const STATUS_TRUE: &str = "True";

/// Condition status value "False"
pub const STATUS_FALSE: &str = "False";

/// Condition status value "Unknown"
pub const STATUS_UNKNOWN: &str = "Unknown";

// ============================================================================
// Condition Reasons
// ============================================================================

/// The spec was admitted for synchronization.
pub const REASON_ACCEPTED: &str = "Accepted";

/// All desired records were applied at the DNS provider.
pub const REASON_PROGRAMMED: &str = "Programmed";

/// The spec failed validation and will not be synchronized.
pub const REASON_INVALID: &str = "Invalid";

/// Records are awaiting a synchronization cycle.
pub const REASON_PENDING: &str = "Pending";

/// The last synchronization cycle failed or only partially applied.
pub const REASON_FAILED: &str = "Failed";
