// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Status client capability for `DNSEndpoint` resources.
//!
//! The status orchestrator needs exactly two operations: fetch a resource and
//! write its status subresource. This module defines that capability as a
//! trait so orchestration code never depends on a transport, plus the error
//! type shared by all transports.
//!
//! Two adapters satisfy the capability:
//!
//! - [`api::ApiStatusClient`] - typed [`kube::Api`] client
//! - [`rest::RestStatusClient`] - direct REST requests against the
//!   apiserver's subresource URLs
//!
//! Both write only the status subresource, so a status update can never race
//! with or clobber concurrent spec edits made by other actors. Which adapter
//! to use is a constructor-time decision of whoever builds the
//! [`StatusUpdater`](crate::status_updater::StatusUpdater).

use crate::crd::DNSEndpoint;
use async_trait::async_trait;
use thiserror::Error;

pub mod api;
pub mod rest;

/// Errors from status client operations.
#[derive(Error, Debug)]
pub enum StatusError {
    /// The resource does not exist (HTTP 404).
    ///
    /// Returned when a change set references a resource that was deleted
    /// between the sync cycle reading it and the status write.
    #[error("DNSEndpoint '{namespace}/{name}' not found")]
    NotFound {
        /// Namespace of the missing resource
        namespace: String,
        /// Name of the missing resource
        name: String,
    },

    /// The write lost an optimistic-concurrency race (HTTP 409).
    ///
    /// Expected under concurrent writers; the next sync cycle re-fetches the
    /// latest version and replays the transition cleanly.
    #[error("conflicting write to DNSEndpoint '{namespace}/{name}': {reason}")]
    Conflict {
        /// Namespace of the contended resource
        namespace: String,
        /// Name of the contended resource
        name: String,
        /// Conflict message reported by the API server
        reason: String,
    },

    /// Any other Kubernetes API failure.
    #[error("Kubernetes API error: {0}")]
    Api(#[from] kube::Error),

    /// The resource could not be serialized for the write.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StatusError {
    /// Whether this error is an optimistic-concurrency conflict.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, StatusError::Conflict { .. })
    }
}

/// Map a raw kube error onto [`StatusError`], classifying 404 and 409.
pub(crate) fn map_kube_error(namespace: &str, name: &str, err: kube::Error) -> StatusError {
    match err {
        kube::Error::Api(ref response) if response.code == 404 => StatusError::NotFound {
            namespace: namespace.to_string(),
            name: name.to_string(),
        },
        kube::Error::Api(ref response) if response.code == 409 => StatusError::Conflict {
            namespace: namespace.to_string(),
            name: name.to_string(),
            reason: response.message.clone(),
        },
        other => StatusError::Api(other),
    }
}

/// Narrow capability for reading a `DNSEndpoint` and writing its status.
///
/// Implementations must target the live object and the status subresource
/// only; optimistic-concurrency protection comes from the resourceVersion
/// carried on the resource being written.
#[async_trait]
pub trait StatusClient: Send + Sync {
    /// Fetch the current resource.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::NotFound`] if the resource no longer exists, or
    /// [`StatusError::Api`] for transport failures.
    async fn get(&self, namespace: &str, name: &str) -> Result<DNSEndpoint, StatusError>;

    /// Write the resource's status subresource, returning the updated resource.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::Conflict`] when the write loses an
    /// optimistic-concurrency race, [`StatusError::NotFound`] if the resource
    /// was deleted, or [`StatusError::Api`] for transport failures.
    async fn update_status(&self, endpoint: &DNSEndpoint) -> Result<DNSEndpoint, StatusError>;
}
