// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Label based discovery of target workloads.

use crate::error::Result;
use crate::kubernetes::ObjectStore;
use kube::api::{ApiResource, DynamicObject, GroupVersionKind, TypeMeta};
use std::collections::BTreeMap;
use tracing::{error, info, instrument};

/// Equality selector AND-ing every label; `None` when there is nothing to match on.
pub fn label_selector(match_labels: &BTreeMap<String, String>) -> Option<String> {
    if match_labels.is_empty() {
        return None;
    }
    Some(
        match_labels
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// List the objects of `gvk` in `namespace` carrying all of `match_labels`.
///
/// An empty selector matches every object in the namespace. An empty result
/// is not an error. Returned objects carry `apiVersion`/`kind` so they can be
/// written back as-is.
#[instrument(skip(store, gvk, match_labels), fields(gvk = %format!("{}/{}", gvk.api_version(), gvk.kind)))]
pub async fn search(
    store: &dyn ObjectStore,
    namespace: &str,
    gvk: &GroupVersionKind,
    match_labels: &BTreeMap<String, String>,
) -> Result<Vec<DynamicObject>> {
    let resource = ApiResource::from_gvk(gvk);
    let selector = label_selector(match_labels);

    info!(
        "Searching for target applications with selector '{}'...",
        selector.as_deref().unwrap_or_default()
    );

    let mut objects = store
        .list(namespace, &resource, selector.as_deref())
        .await
        .inspect_err(|e| error!("Failed to list {}: {}", resource.plural, e))?;

    for object in &mut objects {
        object.types.get_or_insert_with(|| TypeMeta {
            api_version: resource.api_version.clone(),
            kind: resource.kind.clone(),
        });
    }

    info!("{} application(s) found", objects.len());
    Ok(objects)
}
