// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Direct REST transport for the status client capability.
//!
//! Builds subresource requests against the apiserver URL paths directly via
//! [`kube::core::Request`] and sends them over the shared HTTP client. Useful
//! where the typed client's caching or discovery behavior is unwanted; the
//! orchestrator cannot tell the two transports apart.

use super::{map_kube_error, StatusClient, StatusError};
use crate::constants::{API_GROUP, API_VERSION, PLURAL_DNS_ENDPOINTS};
use crate::crd::DNSEndpoint;
use async_trait::async_trait;
use kube::api::{GetParams, PostParams};
use kube::core::Request;
use kube::{Client, ResourceExt};

/// Status client issuing raw REST requests against the apiserver.
#[derive(Clone)]
pub struct RestStatusClient {
    client: Client,
}

impl RestStatusClient {
    /// Create a new REST status client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// URL path of the namespaced `DNSEndpoint` collection.
#[must_use]
pub fn collection_path(namespace: &str) -> String {
    format!("/apis/{API_GROUP}/{API_VERSION}/namespaces/{namespace}/{PLURAL_DNS_ENDPOINTS}")
}

#[async_trait]
impl StatusClient for RestStatusClient {
    async fn get(&self, namespace: &str, name: &str) -> Result<DNSEndpoint, StatusError> {
        let request = Request::new(collection_path(namespace))
            .get(name, &GetParams::default())
            .map_err(kube::Error::BuildRequest)
            .map_err(|e| map_kube_error(namespace, name, e))?;

        self.client
            .request::<DNSEndpoint>(request)
            .await
            .map_err(|e| map_kube_error(namespace, name, e))
    }

    async fn update_status(&self, endpoint: &DNSEndpoint) -> Result<DNSEndpoint, StatusError> {
        let namespace = endpoint.namespace().unwrap_or_default();
        let name = endpoint.name_any();
        let data = serde_json::to_vec(endpoint)?;

        let request = Request::new(collection_path(&namespace))
            .replace_subresource("status", &name, &PostParams::default(), data)
            .map_err(kube::Error::BuildRequest)
            .map_err(|e| map_kube_error(&namespace, &name, e))?;

        self.client
            .request::<DNSEndpoint>(request)
            .await
            .map_err(|e| map_kube_error(&namespace, &name, e))
    }
}
