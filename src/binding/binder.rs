// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::binding::kind::resolve_list_kind;
use crate::binding::locator::search;
use crate::binding::mutator::apply_to_workloads;
use crate::error::Result;
use crate::kubernetes::ObjectStore;
use crate::types::BindingRequest;
use kube::api::ApiResource;
use tracing::{info, instrument};

/// Executes the binding act for one request: workloads matching the
/// application selector are updated to consume the intermediary secret as
/// environment variables.
pub struct Binder<'a> {
    store: &'a dyn ObjectStore,
    request: &'a BindingRequest,
}

impl<'a> Binder<'a> {
    pub fn new(store: &'a dyn ObjectStore, request: &'a BindingRequest) -> Self {
        Self { store, request }
    }

    /// Resolve the kind, search the namespace and bind every match.
    /// The first failing stage aborts the pass.
    #[instrument(
        skip(self),
        fields(
            request = %format!("{}/{}", self.request.namespace, self.request.secret_name),
            kind = %self.request.application_selector.resource_kind
        )
    )]
    pub async fn bind(&self) -> Result<()> {
        let selector = &self.request.application_selector;
        let gvk = resolve_list_kind(&selector.resource_kind)?;

        let objects = search(
            self.store,
            &self.request.namespace,
            &gvk,
            &selector.match_labels,
        )
        .await?;

        if objects.is_empty() {
            info!("No applications found to bind yet");
            return Ok(());
        }

        apply_to_workloads(
            self.store,
            &ApiResource::from_gvk(&gvk),
            objects,
            &self.request.secret_name,
        )
        .await
    }
}
