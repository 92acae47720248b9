// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The object-store client contract shared by the concrete Kubernetes client
//! and the unstructured wrapper.

pub mod object;

pub use object::{ListObject, Object, ObjectKey};

use crate::error::Result;
use crate::kubernetes::{RestMapper, Scheme};
use async_trait::async_trait;
use kube::api::{DeleteParams, ListParams, Patch, PatchParams, PostParams};
use kube::core::params::GetParams;
use serde_json::Value;

/// Options for [`Client::list`]
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Namespace to list in, `None` lists across all namespaces
    pub namespace: Option<String>,
    pub params: ListParams,
}

impl ListOptions {
    pub fn in_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            params: ListParams::default(),
        }
    }
}

/// Options for [`Client::delete_all_of`]
#[derive(Debug, Clone, Default)]
pub struct DeleteAllOfOptions {
    pub namespace: Option<String>,
    pub list: ListParams,
    pub delete: DeleteParams,
}

/// Reads and writes objects against the API server.
///
/// Every operation writes the server's response into the object or list it
/// was given, so callers read results back through the same reference.
#[async_trait]
pub trait Client: Send + Sync {
    async fn get(&self, key: &ObjectKey, obj: &mut dyn Object, params: &GetParams) -> Result<()>;

    async fn list(&self, list: &mut dyn ListObject, opts: &ListOptions) -> Result<()>;

    async fn create(&self, obj: &mut dyn Object, params: &PostParams) -> Result<()>;

    async fn update(&self, obj: &mut dyn Object, params: &PostParams) -> Result<()>;

    async fn patch(
        &self,
        obj: &mut dyn Object,
        patch: &Patch<Value>,
        params: &PatchParams,
    ) -> Result<()>;

    async fn delete(&self, obj: &dyn Object, params: &DeleteParams) -> Result<()>;

    /// Delete every object of `obj`'s kind matching the options
    async fn delete_all_of(&self, obj: &dyn Object, opts: &DeleteAllOfOptions) -> Result<()>;

    /// Writer for the status subresource
    fn status(&self) -> Box<dyn StatusWriter + '_>;

    fn scheme(&self) -> &Scheme;

    fn rest_mapper(&self) -> &dyn RestMapper;
}

/// Writes the status subresource of an object
#[async_trait]
pub trait StatusWriter: Send + Sync {
    async fn update(&self, obj: &mut dyn Object, params: &PostParams) -> Result<()>;

    async fn patch(
        &self,
        obj: &mut dyn Object,
        patch: &Patch<Value>,
        params: &PatchParams,
    ) -> Result<()>;
}
