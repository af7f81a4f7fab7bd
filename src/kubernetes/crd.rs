// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Startup gate: the controller only watches kinds the API server serves.

use crate::constants::crd::{POLL_INTERVAL_SECS, POLL_MAX_INTERVAL_SECS};
use crate::error::Result;
use kube::{api::GroupVersionKind, discovery::Discovery, Client};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

fn next_delay(secs: u64) -> u64 {
    secs.saturating_mul(2).min(POLL_MAX_INTERVAL_SECS)
}

/// Whether the API server serves `gvk`. Only the kind's own group is discovered.
pub async fn is_served(client: &Client, gvk: &GroupVersionKind) -> Result<bool> {
    let discovery = Discovery::new(client.clone())
        .filter(&[gvk.group.as_str()])
        .run()
        .await?;

    Ok(discovery.resolve_gvk(gvk).is_some())
}

/// Block until `gvk` is served, polling with a doubling delay.
/// Discovery failures are logged and retried like a missing kind.
#[instrument(skip(client), fields(kind = %gvk.kind, api_version = %gvk.api_version()))]
pub async fn wait_for_crd(client: &Client, gvk: &GroupVersionKind) -> Result<()> {
    let mut delay = POLL_INTERVAL_SECS;

    loop {
        let served = is_served(client, gvk)
            .await
            .inspect_err(|e| warn!("Discovery failed: {}", e))
            .unwrap_or(false);
        if served {
            break;
        }
        info!("Custom resource not served yet, checking again in {}s", delay);
        sleep(Duration::from_secs(delay)).await;
        delay = next_delay(delay);
    }

    info!("Custom resource is served");
    Ok(())
}
