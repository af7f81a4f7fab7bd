// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses and the object store.

use crate::error::{BinderError, Result};
use crate::kubernetes::ObjectStore;
use async_trait::async_trait;
use http::{Request, Response};
use http_body_util::BodyExt;
use kube::api::{ApiResource, DynamicObject};
use kube::client::Body;
use kube::core::ErrorResponse;
use kube::{Client, ResourceExt};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

#[derive(Clone)]
enum Reply {
    Fixed(u16, String),
    /// Answer 200 with the request body
    Echo,
}

/// A request seen by the MockService
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub body: String,
}

/// A mock HTTP service that returns predefined responses based on request paths
/// and records every request it receives.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), Reply>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, Reply::Fixed(status, body.to_string()))
    }

    /// Add a response for PUT requests matching the exact path
    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, Reply::Fixed(status, body.to_string()))
    }

    /// Accept PUT requests on the path and answer with the submitted object
    pub fn echo_put(self, path: &str) -> Self {
        self.on("PUT", path, Reply::Echo)
    }

    fn on(self, method: &str, path: &str, reply: Reply) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), reply);
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn find_response(&self, method: &str, path: &str) -> Option<Reply> {
        let responses = self.responses.lock().unwrap();

        if let Some(resp) = responses.get(&(method.to_string(), path.to_string())) {
            return Some(resp.clone());
        }

        for ((m, p), resp) in responses.iter() {
            if m == method && path.starts_with(p.as_str()) {
                return Some(resp.clone());
            }
        }

        None
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let this = self.clone();

        Box::pin(async move {
            let method = req.method().to_string();
            let path = req.uri().path().to_string();
            let query = req.uri().query().unwrap_or_default().to_string();
            let bytes = req.into_body().collect().await?.to_bytes();
            let body = String::from_utf8_lossy(&bytes).into_owned();

            let reply = this.find_response(&method, &path);
            this.requests.lock().unwrap().push(RecordedRequest {
                method,
                path: path.clone(),
                query,
                body: body.clone(),
            });

            let (status, payload) = match reply {
                Some(Reply::Fixed(status, payload)) => (status, payload),
                Some(Reply::Echo) => (200, body),
                None => (404, not_found_json("object", &path)),
            };

            let response = Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(payload.into_bytes()))?;
            Ok::<Self::Response, tower::BoxError>(response)
        })
    }
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

/// Wrap items in a list response
pub fn list_json(api_version: &str, kind: &str, items: Vec<Value>) -> String {
    json!({
        "apiVersion": api_version,
        "kind": kind,
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

/// A Deployment with a single container and no envFrom directives
pub fn deployment_value(namespace: &str, name: &str, labels: &Value) -> Value {
    json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "labels": labels,
            "resourceVersion": "1"
        },
        "spec": {
            "selector": { "matchLabels": labels },
            "template": {
                "metadata": { "labels": labels },
                "spec": {
                    "containers": [{
                        "name": name,
                        "image": "quay.io/example/app:latest",
                        "command": ["/app"]
                    }]
                }
            }
        }
    })
}

pub fn deployment_json(namespace: &str, name: &str, labels: &Value) -> String {
    deployment_value(namespace, name, labels).to_string()
}

pub fn deployment(namespace: &str, name: &str, labels: &Value) -> DynamicObject {
    serde_json::from_value(deployment_value(namespace, name, labels)).unwrap()
}

/// A ClusterServiceVersion owning the given CRD descriptions, or none at all
pub fn csv_value(namespace: &str, name: &str, owned: Option<Value>) -> Value {
    let mut spec = json!({ "displayName": name });
    if let Some(owned) = owned {
        spec["customresourcedefinitions"] = json!({ "owned": owned });
    }
    json!({
        "apiVersion": "operators.coreos.com/v1alpha1",
        "kind": "ClusterServiceVersion",
        "metadata": { "name": name, "namespace": namespace },
        "spec": spec
    })
}

pub fn csv(namespace: &str, name: &str, owned: Option<Value>) -> DynamicObject {
    serde_json::from_value(csv_value(namespace, name, owned)).unwrap()
}

fn api_error(code: u16, reason: &str, message: String) -> BinderError {
    BinderError::StoreError(kube::Error::Api(ErrorResponse {
        status: "Failure".to_string(),
        message,
        reason: reason.to_string(),
        code,
    }))
}

/// In-memory ObjectStore honouring namespace, kind and equality label selectors.
#[derive(Clone, Default)]
pub struct FakeStore {
    objects: Arc<Mutex<Vec<DynamicObject>>>,
    conflicts: Arc<Mutex<HashSet<String>>>,
    updates: Arc<Mutex<Vec<DynamicObject>>>,
}

impl FakeStore {
    pub fn new(objects: Vec<DynamicObject>) -> Self {
        Self {
            objects: Arc::new(Mutex::new(objects)),
            ..Default::default()
        }
    }

    /// Make every update of the named object fail with a 409 conflict
    pub fn conflict_on(self, name: &str) -> Self {
        self.conflicts.lock().unwrap().insert(name.to_string());
        self
    }

    pub fn updates(&self) -> Vec<DynamicObject> {
        self.updates.lock().unwrap().clone()
    }

    pub fn object(&self, namespace: &str, name: &str) -> Option<DynamicObject> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.namespace().as_deref() == Some(namespace) && o.name_any() == name)
            .cloned()
    }

    fn is_kind(object: &DynamicObject, resource: &ApiResource) -> bool {
        object
            .types
            .as_ref()
            .is_some_and(|t| t.api_version == resource.api_version && t.kind == resource.kind)
    }

    fn matches_selector(object: &DynamicObject, selector: Option<&str>) -> bool {
        let Some(selector) = selector.filter(|s| !s.is_empty()) else {
            return true;
        };
        let labels: &BTreeMap<String, String> = object.labels();
        selector.split(',').all(|term| match term.split_once('=') {
            Some((key, value)) => labels.get(key).is_some_and(|v| v == value),
            None => labels.contains_key(term),
        })
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn list(
        &self,
        namespace: &str,
        resource: &ApiResource,
        label_selector: Option<&str>,
    ) -> Result<Vec<DynamicObject>> {
        Ok(self
            .objects
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.namespace().as_deref() == Some(namespace))
            .filter(|o| Self::is_kind(o, resource))
            .filter(|o| Self::matches_selector(o, label_selector))
            .map(|o| {
                // list items come back without apiVersion/kind, like the API server
                let mut item = o.clone();
                item.types = None;
                item
            })
            .collect())
    }

    async fn get(
        &self,
        namespace: &str,
        name: &str,
        resource: &ApiResource,
    ) -> Result<DynamicObject> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .find(|o| {
                o.namespace().as_deref() == Some(namespace)
                    && o.name_any() == name
                    && Self::is_kind(o, resource)
            })
            .cloned()
            .ok_or_else(|| {
                api_error(
                    404,
                    "NotFound",
                    format!("{} \"{}\" not found", resource.plural, name),
                )
            })
    }

    async fn update(
        &self,
        resource: &ApiResource,
        object: &DynamicObject,
    ) -> Result<DynamicObject> {
        let name = object.name_any();
        if self.conflicts.lock().unwrap().contains(&name) {
            return Err(api_error(
                409,
                "Conflict",
                format!("Operation cannot be fulfilled on {} \"{}\"", resource.plural, name),
            ));
        }

        let mut objects = self.objects.lock().unwrap();
        let Some(stored) = objects.iter_mut().find(|o| {
            o.namespace() == object.namespace()
                && o.name_any() == name
                && Self::is_kind(o, resource)
        }) else {
            return Err(api_error(
                404,
                "NotFound",
                format!("{} \"{}\" not found", resource.plural, name),
            ));
        };

        *stored = object.clone();
        self.updates.lock().unwrap().push(object.clone());
        Ok(object.clone())
    }
}
