// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use kube::{api::GroupVersionKind, Client, CustomResourceExt, Resource};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use service_binder::config::Config;
use service_binder::kubernetes::wait_for_crd;
use service_binder::reconcilers::ServiceBindingRequestReconciler;
use service_binder::types::ServiceBindingRequest;

#[tokio::main]
async fn main() -> Result<()> {
    // `service-binder crd` prints the CustomResourceDefinition manifest
    if std::env::args().nth(1).as_deref() == Some("crd") {
        print!("{}", serde_yaml::to_string(&ServiceBindingRequest::crd())?);
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting service binding operator");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: watch_namespace={}, error_requeue_secs={}",
        config.watch_namespace.as_deref().unwrap_or("<all>"),
        config.error_requeue_secs
    );

    let client = Client::try_default()
        .await
        .context("Failed to create Kubernetes client")?;
    info!("Connected to Kubernetes cluster");

    let gvk = GroupVersionKind::gvk(
        &ServiceBindingRequest::group(&()),
        &ServiceBindingRequest::version(&()),
        &ServiceBindingRequest::kind(&()),
    );
    info!("Waiting for ServiceBindingRequest CRD to become available...");
    wait_for_crd(&client, &gvk).await?;

    ServiceBindingRequestReconciler::new(client, config)
        .run()
        .await?;

    // This should never be reached as the reconciler runs forever
    warn!("Reconciler stopped unexpectedly");
    Ok(())
}
