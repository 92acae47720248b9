// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: an HTTP mock for `kube::Client`, a recording fake
//! `Client`, and object types that expose an unstructured form.

use crate::client::{
    Client, DeleteAllOfOptions, ListObject, ListOptions, Object, ObjectKey, StatusWriter,
};
use crate::error::{Error, Result};
use crate::kubernetes::{RestMapper, Scheme, StaticRestMapper};
use crate::unstructured::{Unstructured, UnstructuredList};
use async_trait::async_trait;
use http::{Request, Response};
use kube::api::{DeleteParams, Patch, PatchParams, PostParams};
use kube::client::Body;
use kube::core::params::GetParams;
use kube::core::{GroupVersionKind, ObjectMeta};
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for requests with `method` matching the exact path
    pub fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses.lock().unwrap().insert(
            (method.to_string(), path.to_string()),
            (status, body.to_string()),
        );
        self
    }

    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    pub fn on_patch(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PATCH", path, status, body)
    }

    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, status, body)
    }

    /// Requests seen so far, as `METHOD path?query`
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> kube::Client {
        kube::Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        self.responses
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned()
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
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let path_and_query = req
            .uri()
            .path_and_query()
            .map(|pq| pq.to_string())
            .unwrap_or_else(|| path.clone());
        self.requests
            .lock()
            .unwrap()
            .push(format!("{} {}", method, path_and_query));

        let response = self.find_response(&method, &path);

        Box::pin(async move {
            let (status, body) = response.unwrap_or_else(|| (404, not_found_json(&path)));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a 404 not found response
pub fn not_found_json(name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("\"{}\" not found", name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

/// Create a mock ConfigMap JSON response
pub fn config_map_json(namespace: &str, name: &str, resource_version: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "resourceVersion": resource_version,
            "uid": "test-uid"
        },
        "data": { "key": "from-server" }
    })
    .to_string()
}

/// Create a mock Widget JSON response
pub fn widget_json(namespace: &str, name: &str, size: i64, ready: bool) -> String {
    serde_json::json!({
        "apiVersion": "example.io/v1",
        "kind": "Widget",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "resourceVersion": "2"
        },
        "spec": { "size": size },
        "status": { "ready": ready }
    })
    .to_string()
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "example.io", version = "v1", kind = "Widget")]
#[kube(namespaced)]
#[kube(status = "WidgetStatus")]
#[serde(rename_all = "camelCase")]
pub struct WidgetSpec {
    pub size: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WidgetStatus {
    pub ready: bool,
}

pub fn widget_gvk() -> GroupVersionKind {
    GroupVersionKind::gvk("example.io", "v1", "Widget")
}

/// An object that keeps its state in an [`Unstructured`] and exposes it
///
/// The inner object is boxed so that its address never coincides with the
/// wrapper's, letting [`RecordingClient`] tell the two apart.
pub struct Composite {
    /// State owned by the wrapper itself, never touched by a client
    pub label: String,
    pub inner: Box<Unstructured>,
}

impl Composite {
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            label: "composite".to_string(),
            inner: Box::new(Unstructured::new(&widget_gvk()).named(name).within(namespace)),
        }
    }
}

impl Object for Composite {
    fn group_version_kind(&self) -> Result<GroupVersionKind> {
        self.inner.group_version_kind()
    }

    fn object_meta(&self) -> &ObjectMeta {
        &self.inner.metadata
    }

    fn to_value(&self) -> Result<Value> {
        Err(Error::NotRegistered("Composite".to_string()))
    }

    fn load_value(&mut self, _value: Value) -> Result<()> {
        Err(Error::NotRegistered("Composite".to_string()))
    }

    fn unstructured(&self) -> Option<&Unstructured> {
        Some(&*self.inner)
    }

    fn unstructured_mut(&mut self) -> Option<&mut Unstructured> {
        Some(&mut *self.inner)
    }
}

/// List counterpart of [`Composite`]
pub struct CompositeList {
    pub inner: Box<UnstructuredList>,
}

impl CompositeList {
    pub fn new() -> Self {
        Self {
            inner: Box::new(UnstructuredList::new(&widget_gvk())),
        }
    }
}

impl ListObject for CompositeList {
    fn item_group_version_kind(&self) -> Result<GroupVersionKind> {
        self.inner.item_group_version_kind()
    }

    fn load_value(&mut self, _value: Value) -> Result<()> {
        Err(Error::NotRegistered("CompositeList".to_string()))
    }

    fn unstructured_list(&self) -> Option<&UnstructuredList> {
        Some(&*self.inner)
    }

    fn unstructured_list_mut(&mut self) -> Option<&mut UnstructuredList> {
        Some(&mut *self.inner)
    }
}

/// Address of a (possibly unsized) reference, for identity checks
pub fn addr_of<T: ?Sized>(value: &T) -> usize {
    value as *const T as *const () as usize
}

/// A call observed by [`RecordingClient`]
#[derive(Debug, Clone)]
pub struct Call {
    pub op: &'static str,
    /// Address of the object or list the call received
    pub target: usize,
    /// Whether the received object could serialize itself; always true for lists
    pub serializable: bool,
    pub key: Option<ObjectKey>,
    /// Debug rendering of the options the call received
    pub options: String,
}

/// A fake client that records every call and optionally writes a canned
/// server response into the object it was given.
pub struct RecordingClient {
    calls: Mutex<Vec<Call>>,
    response: Option<Value>,
    fail: bool,
    status_requests: AtomicUsize,
    scheme: Scheme,
    mapper: StaticRestMapper,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            response: None,
            fail: false,
            status_requests: AtomicUsize::new(0),
            scheme: Scheme::new(),
            mapper: StaticRestMapper::new(),
        }
    }

    pub fn responding_with(mut self, response: Value) -> Self {
        self.response = Some(response);
        self
    }

    /// Fail every call with [`RecordingClient::failure`]
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn failure() -> Error {
        Error::NoMapping("recorded failure".to_string())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Call {
        self.calls().pop().expect("no calls recorded")
    }

    pub fn status_requests(&self) -> usize {
        self.status_requests.load(Ordering::SeqCst)
    }

    fn record(
        &self,
        op: &'static str,
        target: usize,
        serializable: bool,
        key: Option<ObjectKey>,
        options: String,
    ) -> Result<Option<Value>> {
        self.calls.lock().unwrap().push(Call {
            op,
            target,
            serializable,
            key,
            options,
        });
        if self.fail {
            return Err(Self::failure());
        }
        Ok(self.response.clone())
    }

    fn record_object(
        &self,
        op: &'static str,
        obj: &mut dyn Object,
        key: Option<ObjectKey>,
        options: String,
    ) -> Result<()> {
        let serializable = obj.to_value().is_ok();
        if let Some(value) = self.record(op, addr_of(&*obj), serializable, key, options)? {
            obj.load_value(value)?;
        }
        Ok(())
    }
}

#[async_trait]
impl Client for RecordingClient {
    async fn get(&self, key: &ObjectKey, obj: &mut dyn Object, params: &GetParams) -> Result<()> {
        self.record_object("get", obj, Some(key.clone()), format!("{:?}", params))
    }

    async fn list(&self, list: &mut dyn ListObject, opts: &ListOptions) -> Result<()> {
        let target = addr_of(&*list);
        if let Some(value) = self.record("list", target, true, None, format!("{:?}", opts))? {
            list.load_value(value)?;
        }
        Ok(())
    }

    async fn create(&self, obj: &mut dyn Object, params: &PostParams) -> Result<()> {
        self.record_object("create", obj, None, format!("{:?}", params))
    }

    async fn update(&self, obj: &mut dyn Object, params: &PostParams) -> Result<()> {
        self.record_object("update", obj, None, format!("{:?}", params))
    }

    async fn patch(
        &self,
        obj: &mut dyn Object,
        patch: &Patch<Value>,
        params: &PatchParams,
    ) -> Result<()> {
        self.record_object("patch", obj, None, format!("{:?} {:?}", patch, params))
    }

    async fn delete(&self, obj: &dyn Object, params: &DeleteParams) -> Result<()> {
        let serializable = obj.to_value().is_ok();
        self.record("delete", addr_of(obj), serializable, None, format!("{:?}", params))?;
        Ok(())
    }

    async fn delete_all_of(&self, obj: &dyn Object, opts: &DeleteAllOfOptions) -> Result<()> {
        let serializable = obj.to_value().is_ok();
        self.record("delete_all_of", addr_of(obj), serializable, None, format!("{:?}", opts))?;
        Ok(())
    }

    fn status(&self) -> Box<dyn StatusWriter + '_> {
        self.status_requests.fetch_add(1, Ordering::SeqCst);
        Box::new(RecordingStatusWriter { client: self })
    }

    fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    fn rest_mapper(&self) -> &dyn RestMapper {
        &self.mapper
    }
}

struct RecordingStatusWriter<'a> {
    client: &'a RecordingClient,
}

#[async_trait]
impl StatusWriter for RecordingStatusWriter<'_> {
    async fn update(&self, obj: &mut dyn Object, params: &PostParams) -> Result<()> {
        self.client
            .record_object("status.update", obj, None, format!("{:?}", params))
    }

    async fn patch(
        &self,
        obj: &mut dyn Object,
        patch: &Patch<Value>,
        params: &PatchParams,
    ) -> Result<()> {
        self.client.record_object(
            "status.patch",
            obj,
            None,
            format!("{:?} {:?}", patch, params),
        )
    }
}
