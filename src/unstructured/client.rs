// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client that routes objects exposing an unstructured form through it

use crate::client::{
    Client, DeleteAllOfOptions, ListObject, ListOptions, Object, ObjectKey, StatusWriter,
};
use crate::error::Result;
use crate::kubernetes::{RestMapper, Scheme};
use async_trait::async_trait;
use kube::api::{DeleteParams, Patch, PatchParams, PostParams};
use kube::core::params::GetParams;
use serde_json::Value;
use tracing::trace;

/// A [`Client`] that operates on the underlying [`super::Unstructured`] of
/// any object that exposes one, and forwards every other object unchanged.
///
/// The exposed reference is handed over as is, without copying. The wrapped
/// client writes its results into that reference, so callers read them back
/// through the same accessor. The wrapper's own fields are left untouched.
pub struct WrapperClient<C> {
    kube: C,
}

impl<C: Client> WrapperClient<C> {
    pub fn new(kube: C) -> Self {
        Self { kube }
    }

    pub fn inner(&self) -> &C {
        &self.kube
    }
}

#[async_trait]
impl<C: Client> Client for WrapperClient<C> {
    /// Retrieve the object for `key`, writing the server state into the
    /// exposed unstructured form when there is one.
    async fn get(&self, key: &ObjectKey, obj: &mut dyn Object, params: &GetParams) -> Result<()> {
        match obj.unstructured_mut() {
            Some(u) => {
                trace!("get {}: using unstructured form", key);
                self.kube.get(key, u, params).await
            }
            None => self.kube.get(key, obj, params).await,
        }
    }

    /// List objects; on success the list's items hold the server result.
    async fn list(&self, list: &mut dyn ListObject, opts: &ListOptions) -> Result<()> {
        match list.unstructured_list_mut() {
            Some(u) => {
                trace!("list: using unstructured form");
                self.kube.list(u, opts).await
            }
            None => self.kube.list(list, opts).await,
        }
    }

    async fn create(&self, obj: &mut dyn Object, params: &PostParams) -> Result<()> {
        match obj.unstructured_mut() {
            Some(u) => self.kube.create(u, params).await,
            None => self.kube.create(obj, params).await,
        }
    }

    async fn update(&self, obj: &mut dyn Object, params: &PostParams) -> Result<()> {
        match obj.unstructured_mut() {
            Some(u) => self.kube.update(u, params).await,
            None => self.kube.update(obj, params).await,
        }
    }

    async fn patch(
        &self,
        obj: &mut dyn Object,
        patch: &Patch<Value>,
        params: &PatchParams,
    ) -> Result<()> {
        match obj.unstructured_mut() {
            Some(u) => self.kube.patch(u, patch, params).await,
            None => self.kube.patch(obj, patch, params).await,
        }
    }

    async fn delete(&self, obj: &dyn Object, params: &DeleteParams) -> Result<()> {
        match obj.unstructured() {
            Some(u) => self.kube.delete(u, params).await,
            None => self.kube.delete(obj, params).await,
        }
    }

    async fn delete_all_of(&self, obj: &dyn Object, opts: &DeleteAllOfOptions) -> Result<()> {
        match obj.unstructured() {
            Some(u) => self.kube.delete_all_of(u, opts).await,
            None => self.kube.delete_all_of(obj, opts).await,
        }
    }

    /// Status writer applying the same substitution, built fresh from the
    /// wrapped client on every call.
    fn status(&self) -> Box<dyn StatusWriter + '_> {
        Box::new(WrapperStatusClient::new(self.kube.status()))
    }

    fn scheme(&self) -> &Scheme {
        self.kube.scheme()
    }

    fn rest_mapper(&self) -> &dyn RestMapper {
        self.kube.rest_mapper()
    }
}

/// Status writer counterpart of [`WrapperClient`]
pub struct WrapperStatusClient<'a> {
    kube: Box<dyn StatusWriter + 'a>,
}

impl<'a> WrapperStatusClient<'a> {
    pub fn new(kube: Box<dyn StatusWriter + 'a>) -> Self {
        Self { kube }
    }
}

#[async_trait]
impl StatusWriter for WrapperStatusClient<'_> {
    async fn update(&self, obj: &mut dyn Object, params: &PostParams) -> Result<()> {
        match obj.unstructured_mut() {
            Some(u) => self.kube.update(u, params).await,
            None => self.kube.update(obj, params).await,
        }
    }

    async fn patch(
        &self,
        obj: &mut dyn Object,
        patch: &Patch<Value>,
        params: &PatchParams,
    ) -> Result<()> {
        match obj.unstructured_mut() {
            Some(u) => self.kube.patch(u, patch, params).await,
            None => self.kube.patch(obj, patch, params).await,
        }
    }
}
