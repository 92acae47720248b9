// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Registry of statically typed kinds

use kube::core::{ApiResource, GroupVersionKind};
use kube::Resource;
use std::collections::BTreeMap;

type Key = (String, String, String);

fn key_of(gvk: &GroupVersionKind) -> Key {
    (gvk.group.clone(), gvk.version.clone(), gvk.kind.clone())
}

/// Known typed kinds, keyed by group, version and kind.
///
/// Typed objects whose kind is missing here are rejected by
/// [`super::KubeClient`]; unstructured objects bypass the lookup.
#[derive(Debug, Clone, Default)]
pub struct Scheme {
    kinds: BTreeMap<Key, ApiResource>,
}

impl Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a typed resource
    pub fn register<K: Resource<DynamicType = ()>>(&mut self) -> &mut Self {
        let ar = ApiResource::erase::<K>(&());
        let gvk = GroupVersionKind::gvk(&ar.group, &ar.version, &ar.kind);
        self.kinds.insert(key_of(&gvk), ar);
        self
    }

    /// Builder form of [`Scheme::register`]
    pub fn with<K: Resource<DynamicType = ()>>(mut self) -> Self {
        self.register::<K>();
        self
    }

    pub fn recognizes(&self, gvk: &GroupVersionKind) -> bool {
        self.kinds.contains_key(&key_of(gvk))
    }

    pub fn api_resource(&self, gvk: &GroupVersionKind) -> Option<&ApiResource> {
        self.kinds.get(&key_of(gvk))
    }

    pub fn kinds(&self) -> impl Iterator<Item = &ApiResource> {
        self.kinds.values()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
