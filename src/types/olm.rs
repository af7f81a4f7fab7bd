// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::olm::SECRET_X_DESCRIPTOR;
use serde::{Deserialize, Serialize};

/// A CRD description from the `owned` section of a ClusterServiceVersion
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OwnedCrdDescriptor {
    /// Resource argument in the form `<plural>.<group>`
    pub name: String,
    #[serde(default)]
    pub version: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spec_descriptors: Vec<Descriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub status_descriptors: Vec<Descriptor>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "x-descriptors", skip_serializing_if = "Vec::is_empty")]
    pub x_descriptors: Vec<String>,
}

impl Descriptor {
    pub fn is_secret(&self) -> bool {
        self.x_descriptors.iter().any(|x| x == SECRET_X_DESCRIPTOR)
    }
}

impl OwnedCrdDescriptor {
    pub fn status_field_paths(&self) -> Vec<&str> {
        self.status_descriptors
            .iter()
            .map(|d| d.path.as_str())
            .collect()
    }

    /// Paths of spec and status fields annotated as holding a Secret name
    pub fn secret_field_paths(&self) -> Vec<&str> {
        self.spec_descriptors
            .iter()
            .chain(self.status_descriptors.iter())
            .filter(|d| d.is_secret())
            .map(|d| d.path.as_str())
            .collect()
    }

    /// Split `name` as a `<plural>.<group>` resource argument
    pub fn resource_arg(&self) -> (&str, &str) {
        parse_resource_arg(&self.name)
    }
}

/// Split a resource argument on its first dot into `(plural, group)`.
/// A bare plural yields an empty (core) group.
pub fn parse_resource_arg(arg: &str) -> (&str, &str) {
    arg.split_once('.').unwrap_or((arg, ""))
}
