// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// The operator name used as field manager and in log context
pub const OPERATOR_NAME: &str = "service-binding-operator";

/// Structural paths the binder relies on inside generic objects
pub mod paths {
    /// Container list of any pod-template based workload
    pub const CONTAINERS: &[&str] = &["spec", "template", "spec", "containers"];
    /// Owned CRD descriptions inside a ClusterServiceVersion
    pub const OWNED_CRDS: &[&str] = &["spec", "customresourcedefinitions", "owned"];
}

/// Operator Lifecycle Manager packaging metadata
pub mod olm {
    pub const GROUP: &str = "operators.coreos.com";
    pub const VERSION: &str = "v1alpha1";
    pub const CSV_KIND: &str = "ClusterServiceVersion";
    pub const CSV_RESOURCE: &str = "clusterserviceversions";
    /// x-descriptor marking a field that names a Secret
    pub const SECRET_X_DESCRIPTOR: &str = "urn:alm:descriptor:io.kubernetes:Secret";
}

/// CRD polling configuration
pub mod crd {
    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}
