// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # dnsync - External DNS Synchronization Status Operator for Kubernetes
//!
//! dnsync is a Kubernetes operator written in Rust that keeps externally hosted
//! DNS records synchronized with cluster workload state and reports synchronization
//! outcomes back onto `DNSEndpoint` Custom Resources.
//!
//! ## Overview
//!
//! This library provides the core functionality for the dnsync operator, including:
//!
//! - The `DNSEndpoint` Custom Resource Definition (CRD)
//! - A pure condition state machine for `Accepted`/`Programmed` status transitions
//! - Correlation of sync-cycle change sets back to their originating resources
//! - A status-subresource client capability with interchangeable transports
//! - The per-cycle status sync orchestrator
//!
//! ## Modules
//!
//! - [`crd`] - Custom Resource Definition types for DNS endpoints
//! - [`conditions`] - Pure status condition transition functions
//! - [`changes`] - Change-set types produced by one sync cycle
//! - [`correlator`] - Change-set to resource correlation
//! - [`status_client`] - Status read/write capability and its transports
//! - [`status_updater`] - Per-cycle status sync orchestration
//! - [`reconciler`] - The `DNSEndpoint` watch controller
//!
//! ## Example
//!
//! ```rust,no_run
//! use dnsync::changes::Changes;
//! use dnsync::status_client::api::ApiStatusClient;
//! use dnsync::status_updater::StatusUpdater;
//! use std::sync::Arc;
//!
//! async fn report(client: kube::Client, changes: Changes) {
//!     let status = StatusUpdater::new(Arc::new(ApiStatusClient::new(client)));
//!
//!     // After the provider apply step finishes:
//!     status.reconcile(&changes, true, "All records applied").await;
//! }
//! ```
//!
//! ## Features
//!
//! - **Best-Effort Status** - One resource's failed status write never blocks others
//! - **Condition Conventions** - Stable ordering, monotonic transition timestamps,
//!   generation fencing
//! - **Transport Agnostic** - Typed-Api and direct-REST status clients behind one trait
//!
//! For more information, see the [documentation](https://firestoned.github.io/dnsync/).

pub mod changes;
pub mod conditions;
pub mod constants;
pub mod correlator;
pub mod crd;
pub mod events;
pub mod metrics;
pub mod reconciler;
pub mod status_client;
pub mod status_reasons;
pub mod status_updater;

#[cfg(test)]
mod conditions_tests;
