// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Operator Lifecycle Manager packaging metadata.
//!
//! ClusterServiceVersions advertise the CRDs an operator owns, together with
//! descriptors pointing at the fields that carry connection data. Nothing is
//! cached: every call lists or fetches from the store again.

use crate::binding::nested::FieldPath;
use crate::constants::{olm, paths};
use crate::error::Result;
use crate::kubernetes::ObjectStore;
use crate::types::{BackingSelector, OwnedCrdDescriptor};
use kube::api::{ApiResource, DynamicObject, GroupVersionKind};
use kube::ResourceExt;
use tracing::{debug, error, info, instrument};

const OWNED_CRDS: FieldPath = FieldPath::new(paths::OWNED_CRDS);

/// The ClusterServiceVersion resource, addressed by group/version/resource
pub fn csv_resource() -> ApiResource {
    ApiResource::from_gvk_with_plural(
        &GroupVersionKind::gvk(olm::GROUP, olm::VERSION, olm::CSV_KIND),
        olm::CSV_RESOURCE,
    )
}

/// Owned CRD descriptions of the given CSVs, in listing order.
/// CSVs without an `owned` section contribute nothing.
pub fn extract_owned_crds(csvs: &[DynamicObject]) -> Result<Vec<OwnedCrdDescriptor>> {
    let mut crds = Vec::new();
    for csv in csvs {
        let Some(owned) = OWNED_CRDS.get_slice(&csv.data)? else {
            debug!("CSV {} owns no CRDs", csv.name_any());
            continue;
        };
        for raw in owned {
            crds.push(serde_json::from_value(raw.clone())?);
        }
    }
    Ok(crds)
}

/// Kind must match ignoring case; version only when the descriptor declares one.
pub fn matches_gvk(crd: &OwnedCrdDescriptor, gvk: &GroupVersionKind) -> bool {
    if !crd.kind.eq_ignore_ascii_case(&gvk.kind) {
        return false;
    }
    crd.version.is_empty() || crd.version.eq_ignore_ascii_case(&gvk.version)
}

/// The backing selector names a CRD (`<plural>.<group>`), not a kind, so the
/// name is compared. Kubernetes only accepts lowercase CRD names; case is
/// ignored here as it is for kinds. Versions are compared when both sides
/// declare one.
pub fn matches_backing_selector(crd: &OwnedCrdDescriptor, selector: &BackingSelector) -> bool {
    if !crd.name.eq_ignore_ascii_case(&selector.resource_name) {
        return false;
    }
    match selector.resource_version.as_deref() {
        Some(version) if !version.is_empty() && !crd.version.is_empty() => {
            crd.version.eq_ignore_ascii_case(version)
        }
        _ => true,
    }
}

/// Group comes from the `<plural>.<group>` name, version and kind as declared.
pub fn descriptor_gvk(crd: &OwnedCrdDescriptor) -> GroupVersionKind {
    let (_, group) = crd.resource_arg();
    GroupVersionKind::gvk(group, &crd.version, &crd.kind)
}

/// Read access to the packaging metadata of one namespace.
pub struct Olm<'a> {
    store: &'a dyn ObjectStore,
    namespace: String,
}

impl<'a> Olm<'a> {
    pub fn new(store: &'a dyn ObjectStore, namespace: &str) -> Self {
        Self {
            store,
            namespace: namespace.to_string(),
        }
    }

    async fn list_csvs(&self) -> Result<Vec<DynamicObject>> {
        self.store
            .list(&self.namespace, &csv_resource(), None)
            .await
            .inspect_err(|e| error!("Failed to list CSV objects: {}", e))
    }

    /// Every owned CRD description of every CSV in the namespace
    #[instrument(skip(self), fields(namespace = %self.namespace))]
    pub async fn list_owned_descriptors(&self) -> Result<Vec<OwnedCrdDescriptor>> {
        let csvs = self.list_csvs().await?;
        let crds = extract_owned_crds(&csvs)?;
        debug!("{} CSV(s) own {} CRD(s)", csvs.len(), crds.len());
        Ok(crds)
    }

    /// Owned descriptors, or none when the CSV resource is not served
    async fn owned_descriptors_if_served(&self) -> Result<Vec<OwnedCrdDescriptor>> {
        match self.list_owned_descriptors().await {
            Err(e) if e.is_not_found() => {
                info!("ClusterServiceVersions are not served, assuming no owned CRDs");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// First owned CRD description matching `gvk`.
    ///
    /// When several CSVs describe the same kind the first one in listing
    /// order wins. A namespace where CSVs are not served has no match.
    #[instrument(skip(self), fields(namespace = %self.namespace))]
    pub async fn select_by_gvk(
        &self,
        gvk: &GroupVersionKind,
    ) -> Result<Option<OwnedCrdDescriptor>> {
        let selected = self
            .owned_descriptors_if_served()
            .await?
            .into_iter()
            .find(|crd| matches_gvk(crd, gvk));

        match &selected {
            Some(crd) => info!("CRD description {} matches {}", crd.name, gvk.kind),
            None => info!("No CRD description could be found for {}", gvk.kind),
        }
        Ok(selected)
    }

    /// First owned CRD description a backing selector points at
    #[instrument(skip(self), fields(namespace = %self.namespace))]
    pub async fn select_by_backing_selector(
        &self,
        selector: &BackingSelector,
    ) -> Result<Option<OwnedCrdDescriptor>> {
        Ok(self
            .owned_descriptors_if_served()
            .await?
            .into_iter()
            .find(|crd| matches_backing_selector(crd, selector)))
    }

    /// GVKs of every owned CRD in the namespace
    #[instrument(skip(self), fields(namespace = %self.namespace))]
    pub async fn list_owned_gvks(&self) -> Result<Vec<GroupVersionKind>> {
        Ok(self
            .list_owned_descriptors()
            .await?
            .iter()
            .map(descriptor_gvk)
            .collect())
    }

    /// GVKs owned by a single CSV. A missing CSV is a store error.
    #[instrument(skip(self))]
    pub async fn list_gvks_for_packaging_object(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Vec<GroupVersionKind>> {
        let csv = self
            .store
            .get(namespace, name, &csv_resource())
            .await
            .inspect_err(|e| error!("Failed to read CSV {}/{}: {}", namespace, name, e))?;

        Ok(extract_owned_crds(&[csv])?
            .iter()
            .map(descriptor_gvk)
            .collect())
    }
}
