// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Schema-agnostic access to namespaced objects.

use crate::error::Result;
use async_trait::async_trait;
use kube::{
    api::{ApiResource, DynamicObject, ListParams, PostParams},
    Api, Client, ResourceExt,
};
use tracing::{debug, instrument};

/// Generic list/get/update over dynamically typed objects.
///
/// Writes are full replacements carrying the object's `resourceVersion`, so
/// concurrent writers are detected by the API server and surface as a
/// `StoreError` with code 409.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn list(
        &self,
        namespace: &str,
        resource: &ApiResource,
        label_selector: Option<&str>,
    ) -> Result<Vec<DynamicObject>>;

    async fn get(&self, namespace: &str, name: &str, resource: &ApiResource)
        -> Result<DynamicObject>;

    async fn update(&self, resource: &ApiResource, object: &DynamicObject)
        -> Result<DynamicObject>;
}

/// ObjectStore backed by the Kubernetes API server
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl KubeStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, namespace: &str, resource: &ApiResource) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, resource)
    }
}

#[async_trait]
impl ObjectStore for KubeStore {
    #[instrument(skip(self, resource), fields(kind = %resource.kind))]
    async fn list(
        &self,
        namespace: &str,
        resource: &ApiResource,
        label_selector: Option<&str>,
    ) -> Result<Vec<DynamicObject>> {
        let mut lp = ListParams::default();
        if let Some(selector) = label_selector {
            lp = lp.labels(selector);
        }

        let list = self.api(namespace, resource).list(&lp).await?;
        debug!("Listed {} object(s)", list.items.len());
        Ok(list.items)
    }

    #[instrument(skip(self, resource), fields(kind = %resource.kind))]
    async fn get(
        &self,
        namespace: &str,
        name: &str,
        resource: &ApiResource,
    ) -> Result<DynamicObject> {
        Ok(self.api(namespace, resource).get(name).await?)
    }

    #[instrument(
        skip(self, resource, object),
        fields(kind = %resource.kind, object = %format!("{}/{}", object.namespace().unwrap_or_default(), object.name_any()))
    )]
    async fn update(
        &self,
        resource: &ApiResource,
        object: &DynamicObject,
    ) -> Result<DynamicObject> {
        let namespace = object.namespace().unwrap_or_default();
        let updated = self
            .api(&namespace, resource)
            .replace(&object.name_any(), &PostParams::default(), object)
            .await?;
        Ok(updated)
    }
}
