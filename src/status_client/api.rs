// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Typed [`kube::Api`] transport for the status client capability.

use super::{map_kube_error, StatusClient, StatusError};
use crate::crd::DNSEndpoint;
use async_trait::async_trait;
use kube::api::PostParams;
use kube::{Api, Client, ResourceExt};

/// Status client backed by the generic typed object client.
///
/// `update_status` uses `replace_status`, which sends the full object carrying
/// its `resourceVersion`; the API server rejects stale writes with a 409.
#[derive(Clone)]
pub struct ApiStatusClient {
    client: Client,
}

impl ApiStatusClient {
    /// Create a new typed status client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, namespace: &str) -> Api<DNSEndpoint> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl StatusClient for ApiStatusClient {
    async fn get(&self, namespace: &str, name: &str) -> Result<DNSEndpoint, StatusError> {
        self.api(namespace)
            .get(name)
            .await
            .map_err(|e| map_kube_error(namespace, name, e))
    }

    async fn update_status(&self, endpoint: &DNSEndpoint) -> Result<DNSEndpoint, StatusError> {
        let namespace = endpoint.namespace().unwrap_or_default();
        let name = endpoint.name_any();

        self.api(&namespace)
            .replace_status(&name, &PostParams::default(), endpoint)
            .await
            .map_err(|e| map_kube_error(&namespace, &name, e))
    }
}
