// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::{CustomResource, ResourceExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(
    group = "apps.openshift.io",
    version = "v1alpha1",
    kind = "ServiceBindingRequest"
)]
#[kube(namespaced)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBindingRequestSpec {
    pub backing_selector: BackingSelector,
    pub application_selector: ApplicationSelector,
}

/// Identifies the backing service by its owned CRD description
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackingSelector {
    pub resource_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
}

/// Selects the workloads that consume the binding
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSelector {
    /// Short kind name, e.g. "Deployment" or "DeploymentConfig"
    pub resource_kind: String,
    #[serde(default)]
    pub match_labels: BTreeMap<String, String>,
}

/// Read-only view of a ServiceBindingRequest for one reconciliation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct BindingRequest {
    pub namespace: String,
    pub application_selector: ApplicationSelector,
    /// Intermediary secret injected into the workloads; named after the request
    pub secret_name: String,
    pub backing_selector: BackingSelector,
}

impl From<&ServiceBindingRequest> for BindingRequest {
    fn from(sbr: &ServiceBindingRequest) -> Self {
        BindingRequest {
            namespace: sbr.namespace().unwrap_or_default(),
            application_selector: sbr.spec.application_selector.clone(),
            secret_name: sbr.name_any(),
            backing_selector: sbr.spec.backing_selector.clone(),
        }
    }
}
