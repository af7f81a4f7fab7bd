// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resolution of short resource kind names to their API descriptors.

use crate::error::{BinderError, Result};
use kube::api::{ApiResource, GroupVersionKind};
use std::str::FromStr;

/// Workload kinds the binder knows how to search and mutate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Deployment,
    DeploymentConfig,
}

impl ResourceKind {
    pub fn gvk(&self) -> GroupVersionKind {
        match self {
            ResourceKind::Deployment => GroupVersionKind::gvk("apps", "v1", "Deployment"),
            ResourceKind::DeploymentConfig => {
                GroupVersionKind::gvk("apps.openshift.io", "v1", "DeploymentConfig")
            }
        }
    }

    /// Kind of the list object returned when querying this resource
    pub fn list_kind(&self) -> String {
        format!("{}List", self.gvk().kind)
    }

    pub fn api_resource(&self) -> ApiResource {
        ApiResource::from_gvk(&self.gvk())
    }
}

impl FromStr for ResourceKind {
    type Err = BinderError;

    fn from_str(s: &str) -> Result<Self> {
        let kind = s.to_lowercase();
        match kind.as_str() {
            "deployment" => Ok(ResourceKind::Deployment),
            "deploymentconfig" => Ok(ResourceKind::DeploymentConfig),
            _ => Err(BinderError::UnsupportedKind(kind)),
        }
    }
}

/// Resolve a resource kind as written in an application selector.
pub fn resolve_list_kind(resource_kind: &str) -> Result<GroupVersionKind> {
    Ok(resource_kind.parse::<ResourceKind>()?.gvk())
}
