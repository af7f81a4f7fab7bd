// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Injection of the intermediary secret into workload containers.

use crate::binding::nested::FieldPath;
use crate::constants::paths;
use crate::error::{BinderError, Result};
use crate::kubernetes::ObjectStore;
use k8s_openapi::api::core::v1::{Container, EnvFromSource, SecretEnvSource};
use kube::api::{ApiResource, DynamicObject};
use kube::ResourceExt;
use serde_json::Value;
use tracing::{debug, info, instrument};

const CONTAINERS: FieldPath = FieldPath::new(paths::CONTAINERS);

fn references_secret(entry: &EnvFromSource, secret_name: &str) -> bool {
    entry
        .secret_ref
        .as_ref()
        .is_some_and(|secret| secret.name == secret_name)
}

/// `references_secret` on a raw container, without converting it
fn raw_references_secret(container: &Value, secret_name: &str) -> bool {
    container
        .get("envFrom")
        .and_then(Value::as_array)
        .is_some_and(|entries| {
            entries.iter().any(|e| {
                e.pointer("/secretRef/name").and_then(Value::as_str) == Some(secret_name)
            })
        })
}

/// Make sure `container` loads `secret_name` through `envFrom`.
///
/// Existing entries keep their order; the new entry is appended. A container
/// already referencing the secret is returned untouched.
pub fn inject_secret_reference(mut container: Container, secret_name: &str) -> Container {
    let present = container
        .env_from
        .as_ref()
        .is_some_and(|entries| entries.iter().any(|e| references_secret(e, secret_name)));

    if present {
        debug!(container = %container.name, "Directive 'envFrom' is already present");
        return container;
    }

    debug!(container = %container.name, "Adding 'envFrom' directive");
    container
        .env_from
        .get_or_insert_with(Vec::new)
        .push(EnvFromSource {
            secret_ref: Some(SecretEnvSource {
                name: secret_name.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        });
    container
}

/// Bind every container of one object in memory.
///
/// Returns whether the object changed. When every container already
/// references the secret the object is left as it was, unknown container
/// fields included. Fails with `UnsupportedShape` when the object has no
/// container list, again leaving the object untouched.
pub fn bind_object(object: &mut DynamicObject, secret_name: &str) -> Result<bool> {
    let kind = object
        .types
        .as_ref()
        .map(|t| t.kind.clone())
        .unwrap_or_default();

    let Some(containers) = CONTAINERS.get_slice(&object.data)? else {
        return Err(BinderError::UnsupportedShape {
            kind,
            path: CONTAINERS.to_string(),
        });
    };

    if containers
        .iter()
        .all(|c| raw_references_secret(c, secret_name))
    {
        return Ok(false);
    }

    let bound = containers
        .iter()
        .map(|raw| -> Result<Value> {
            let container: Container = serde_json::from_value(raw.clone())?;
            Ok(serde_json::to_value(inject_secret_reference(
                container,
                secret_name,
            ))?)
        })
        .collect::<Result<Vec<Value>>>()?;

    CONTAINERS.set_slice(&mut object.data, bound)?;
    Ok(true)
}

/// Bind each object and write it back with one update call per object.
/// Objects that already reference the secret are not written.
///
/// The first failure stops the pass. Objects written before it stay written;
/// every write is idempotent so a later pass converges.
#[instrument(skip(store, resource, objects), fields(kind = %resource.kind, count = objects.len()))]
pub async fn apply_to_workloads(
    store: &dyn ObjectStore,
    resource: &ApiResource,
    objects: Vec<DynamicObject>,
    secret_name: &str,
) -> Result<()> {
    for mut object in objects {
        let name = object.name_any();
        debug!("Inspecting object {}...", name);

        if !bind_object(&mut object, secret_name)? {
            debug!("Object {} already references secret {}", name, secret_name);
            continue;
        }

        info!("Updating object {} to reference secret {}", name, secret_name);
        store.update(resource, &object).await?;
    }

    Ok(())
}
