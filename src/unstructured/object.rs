// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Schema-agnostic object and list representations

use crate::client::{ListObject, Object};
use crate::constants::LIST_SUFFIX;
use crate::error::{Error, Result};
use kube::core::{DynamicObject, GroupVersionKind, ListMeta, ObjectMeta, TypeMeta};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::{Deref, DerefMut};

fn gvk_from_type_meta(types: Option<&TypeMeta>) -> Result<GroupVersionKind> {
    let types = types
        .filter(|t| !t.api_version.is_empty() && !t.kind.is_empty())
        .ok_or(Error::MissingKind)?;
    let (group, version) = types
        .api_version
        .rsplit_once('/')
        .unwrap_or(("", types.api_version.as_str()));
    Ok(GroupVersionKind::gvk(group, version, &types.kind))
}

fn type_meta_of(gvk: &GroupVersionKind, kind: String) -> TypeMeta {
    TypeMeta {
        api_version: gvk.api_version(),
        kind,
    }
}

/// A dynamically typed object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unstructured(pub DynamicObject);

impl Unstructured {
    /// An empty object of the given kind
    pub fn new(gvk: &GroupVersionKind) -> Self {
        Self(DynamicObject {
            types: Some(type_meta_of(gvk, gvk.kind.clone())),
            metadata: ObjectMeta::default(),
            data: Value::Object(Map::new()),
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.0.metadata.name = Some(name.into());
        self
    }

    pub fn within(mut self, namespace: impl Into<String>) -> Self {
        self.0.metadata.namespace = Some(namespace.into());
        self
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self(serde_json::from_value(value)?))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(Self(serde_yaml::from_str(yaml)?))
    }

    pub fn into_inner(self) -> DynamicObject {
        self.0
    }

    pub fn group_version_kind(&self) -> Result<GroupVersionKind> {
        gvk_from_type_meta(self.0.types.as_ref())
    }

    /// Look up a nested field in the object's data, e.g. `["spec", "replicas"]`
    pub fn field(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(&self.0.data, |value, segment| value.get(segment))
    }

    /// Set a nested field, creating intermediate maps as needed
    pub fn set_field(&mut self, path: &[&str], value: Value) -> Result<()> {
        let Some((last, parents)) = path.split_last() else {
            return Err(Error::InvalidFieldPath(String::new()));
        };

        let mut current = &mut self.0.data;
        for segment in parents {
            if current.is_null() {
                *current = Value::Object(Map::new());
            }
            let Some(map) = current.as_object_mut() else {
                return Err(Error::InvalidFieldPath(path.join(".")));
            };
            current = map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        if current.is_null() {
            *current = Value::Object(Map::new());
        }
        match current.as_object_mut() {
            Some(map) => {
                map.insert(last.to_string(), value);
                Ok(())
            }
            None => Err(Error::InvalidFieldPath(path.join("."))),
        }
    }
}

impl From<DynamicObject> for Unstructured {
    fn from(obj: DynamicObject) -> Self {
        Self(obj)
    }
}

impl Deref for Unstructured {
    type Target = DynamicObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Unstructured {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Object for Unstructured {
    fn group_version_kind(&self) -> Result<GroupVersionKind> {
        Unstructured::group_version_kind(self)
    }

    fn object_meta(&self) -> &ObjectMeta {
        &self.0.metadata
    }

    fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(&self.0)?)
    }

    fn load_value(&mut self, value: Value) -> Result<()> {
        self.0 = serde_json::from_value(value)?;
        Ok(())
    }

    fn unstructured(&self) -> Option<&Unstructured> {
        Some(self)
    }

    fn unstructured_mut(&mut self) -> Option<&mut Unstructured> {
        Some(self)
    }
}

/// A dynamically typed list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnstructuredList {
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,
    #[serde(default)]
    pub metadata: ListMeta,
    #[serde(default)]
    pub items: Vec<Unstructured>,
}

impl UnstructuredList {
    /// An empty list holding items of the given kind
    pub fn new(item_gvk: &GroupVersionKind) -> Self {
        Self {
            types: Some(type_meta_of(
                item_gvk,
                format!("{}{}", item_gvk.kind, LIST_SUFFIX),
            )),
            metadata: ListMeta::default(),
            items: Vec::new(),
        }
    }

    /// Kind of the items, derived from the list kind
    pub fn item_group_version_kind(&self) -> Result<GroupVersionKind> {
        let gvk = gvk_from_type_meta(self.types.as_ref())?;
        let kind = gvk.kind.strip_suffix(LIST_SUFFIX).unwrap_or(&gvk.kind);
        Ok(GroupVersionKind::gvk(&gvk.group, &gvk.version, kind))
    }
}

impl ListObject for UnstructuredList {
    fn item_group_version_kind(&self) -> Result<GroupVersionKind> {
        UnstructuredList::item_group_version_kind(self)
    }

    fn load_value(&mut self, value: Value) -> Result<()> {
        let item_gvk = self.item_group_version_kind()?;
        let mut loaded: UnstructuredList = serde_json::from_value(value)?;

        // The server omits apiVersion/kind on list items
        for item in &mut loaded.items {
            if gvk_from_type_meta(item.0.types.as_ref()).is_err() {
                item.0.types = Some(type_meta_of(&item_gvk, item_gvk.kind.clone()));
            }
        }
        if loaded.types.is_none() {
            loaded.types = self.types.take();
        }

        *self = loaded;
        Ok(())
    }

    fn unstructured_list(&self) -> Option<&UnstructuredList> {
        Some(self)
    }

    fn unstructured_list_mut(&mut self) -> Option<&mut UnstructuredList> {
        Some(self)
    }
}
