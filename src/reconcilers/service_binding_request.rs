// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! ServiceBindingRequest reconciler - binds the selected applications to the request's secret.

use crate::binding::Binder;
use crate::config::Config;
use crate::error::{BinderError, Result};
use crate::kubernetes::KubeStore;
use crate::olm::Olm;
use crate::types::{BindingRequest, ServiceBindingRequest};
use futures::StreamExt;
use kube::{
    runtime::{controller::Action, Controller},
    Api, Client, ResourceExt,
};
use kube_runtime::watcher::Config as WatcherConfig;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub struct ServiceBindingRequestReconciler {
    client: Client,
    store: KubeStore,
    config: Config,
}

impl ServiceBindingRequestReconciler {
    pub fn new(client: Client, config: Config) -> Self {
        Self {
            store: KubeStore::new(client.clone()),
            client,
            config,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let requests: Api<ServiceBindingRequest> = match &self.config.watch_namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        };
        let context = Arc::new(self);

        Controller::new(requests, WatcherConfig::default())
            .run(reconcile, error_policy, context)
            .for_each(|res| async move {
                match res {
                    Ok(o) => debug!("Reconciled service binding request: {:?}", o),
                    Err(e) => warn!("Reconciliation error: {:?}", e),
                }
            })
            .await;

        Ok(())
    }
}

async fn reconcile(
    sbr: Arc<ServiceBindingRequest>,
    ctx: Arc<ServiceBindingRequestReconciler>,
) -> Result<Action> {
    let request = BindingRequest::from(sbr.as_ref());

    debug!(
        "Reconciling service binding request: {}/{}",
        request.namespace,
        sbr.name_any()
    );

    let olm = Olm::new(&ctx.store, &request.namespace);
    match olm.select_by_backing_selector(&request.backing_selector).await {
        Ok(Some(crd)) => info!(
            "Backing service {} ({}) exposes secret fields {:?}",
            crd.name,
            crd.kind,
            crd.secret_field_paths()
        ),
        Ok(None) => info!(
            "No CSV in namespace {} owns {}",
            request.namespace, request.backing_selector.resource_name
        ),
        Err(e) => warn!(
            "Could not look up backing service {}: {}",
            request.backing_selector.resource_name, e
        ),
    }

    Binder::new(&ctx.store, &request).bind().await?;

    info!(
        "Applications bound to secret {}/{}",
        request.namespace, request.secret_name
    );
    Ok(Action::await_change())
}

fn error_policy(
    _sbr: Arc<ServiceBindingRequest>,
    error: &BinderError,
    ctx: Arc<ServiceBindingRequestReconciler>,
) -> Action {
    error!("Reconciliation error: {}", error);
    Action::requeue(Duration::from_secs(ctx.config.error_requeue_secs))
}
