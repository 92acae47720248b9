// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Object and list contracts accepted by a [`super::Client`]

use crate::error::Result;
use crate::unstructured::{Unstructured, UnstructuredList};
use kube::core::{GroupVersionKind, ObjectList, ObjectMeta};
use kube::Resource;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fmt;

/// An identifiable object that can be sent to and loaded from the API server.
///
/// The probes `unstructured` and `unstructured_mut` make up the optional
/// "exposes unstructured form" capability. Types that hold their state as an
/// [`Unstructured`] override both to return it, which lets a
/// [`crate::unstructured::WrapperClient`] hand that reference to the
/// underlying client instead of the object itself.
///
/// Every typed kube resource (`k8s-openapi` types and `#[derive(CustomResource)]`
/// kinds) gets `Object` from the blanket impl below, and so never exposes an
/// unstructured form: both probes are fixed to `None`. A type that wants the
/// capability must implement `Object` by hand around an [`Unstructured`]
/// instead of deriving its schema.
pub trait Object: Send + Sync {
    fn group_version_kind(&self) -> Result<GroupVersionKind>;

    fn object_meta(&self) -> &ObjectMeta;

    /// Serialize into the JSON body sent to the server
    fn to_value(&self) -> Result<Value>;

    /// Replace the object's state with what the server returned
    fn load_value(&mut self, value: Value) -> Result<()>;

    /// The exposed unstructured form, if any
    fn unstructured(&self) -> Option<&Unstructured> {
        None
    }

    fn unstructured_mut(&mut self) -> Option<&mut Unstructured> {
        None
    }
}

/// A list of objects that can be loaded from the API server.
///
/// `unstructured_list` and `unstructured_list_mut` are the list counterpart
/// of the probes on [`Object`].
pub trait ListObject: Send + Sync {
    /// Kind of the items held by this list
    fn item_group_version_kind(&self) -> Result<GroupVersionKind>;

    fn load_value(&mut self, value: Value) -> Result<()>;

    fn unstructured_list(&self) -> Option<&UnstructuredList> {
        None
    }

    fn unstructured_list_mut(&mut self) -> Option<&mut UnstructuredList> {
        None
    }
}

fn static_gvk<K: Resource<DynamicType = ()>>() -> GroupVersionKind {
    GroupVersionKind::gvk(&K::group(&()), &K::version(&()), &K::kind(&()))
}

impl<K> Object for K
where
    K: Resource<DynamicType = ()> + Serialize + DeserializeOwned + Send + Sync,
{
    fn group_version_kind(&self) -> Result<GroupVersionKind> {
        Ok(static_gvk::<K>())
    }

    fn object_meta(&self) -> &ObjectMeta {
        Resource::meta(self)
    }

    fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn load_value(&mut self, value: Value) -> Result<()> {
        *self = serde_json::from_value(value)?;
        Ok(())
    }
}

impl<K> ListObject for ObjectList<K>
where
    K: Resource<DynamicType = ()> + Clone + DeserializeOwned + Send + Sync,
{
    fn item_group_version_kind(&self) -> Result<GroupVersionKind> {
        Ok(static_gvk::<K>())
    }

    fn load_value(&mut self, value: Value) -> Result<()> {
        *self = serde_json::from_value(value)?;
        Ok(())
    }
}

/// Lookup key for a single object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    pub name: String,
    pub namespace: Option<String>,
}

impl ObjectKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
        }
    }

    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Some(namespace.into()),
        }
    }

    /// Build the key addressing an existing object
    pub fn of(obj: &dyn Object) -> Self {
        let meta = obj.object_meta();
        Self {
            name: meta.name.clone().unwrap_or_default(),
            namespace: meta.namespace.clone(),
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{}", ns, self.name),
            None => f.write_str(&self.name),
        }
    }
}
