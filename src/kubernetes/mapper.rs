// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! REST mapping from kinds to API resources and their scope

use crate::error::{describe_gvk, Error, Result};
use kube::core::{ApiResource, GroupVersionKind};
use kube::discovery::{Discovery, Scope};
use kube::{Client, Resource};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Where a kind lives in the API
#[derive(Debug, Clone)]
pub struct RestMapping {
    pub resource: ApiResource,
    pub scope: Scope,
}

impl RestMapping {
    pub fn is_namespaced(&self) -> bool {
        matches!(self.scope, Scope::Namespaced)
    }
}

/// Resolves a kind to the REST resource that serves it
pub trait RestMapper: Send + Sync {
    fn mapping(&self, gvk: &GroupVersionKind) -> Result<RestMapping>;
}

type Key = (String, String, String);

fn key_of(gvk: &GroupVersionKind) -> Key {
    (gvk.group.clone(), gvk.version.clone(), gvk.kind.clone())
}

/// A fixed mapping table
#[derive(Debug, Clone, Default)]
pub struct StaticRestMapper {
    mappings: BTreeMap<Key, RestMapping>,
}

impl StaticRestMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, resource: ApiResource, scope: Scope) -> Self {
        let gvk = GroupVersionKind::gvk(&resource.group, &resource.version, &resource.kind);
        self.mappings
            .insert(key_of(&gvk), RestMapping { resource, scope });
        self
    }

    pub fn namespaced<K: Resource<DynamicType = ()>>(self) -> Self {
        self.add(ApiResource::erase::<K>(&()), Scope::Namespaced)
    }

    pub fn cluster<K: Resource<DynamicType = ()>>(self) -> Self {
        self.add(ApiResource::erase::<K>(&()), Scope::Cluster)
    }
}

impl RestMapper for StaticRestMapper {
    fn mapping(&self, gvk: &GroupVersionKind) -> Result<RestMapping> {
        self.mappings
            .get(&key_of(gvk))
            .cloned()
            .ok_or_else(|| Error::NoMapping(describe_gvk(gvk)))
    }
}

/// Mapper backed by API discovery
pub struct DiscoveryRestMapper {
    discovery: Discovery,
}

impl DiscoveryRestMapper {
    /// Run discovery for the given API groups, or all groups when empty
    #[instrument(skip(client))]
    pub async fn run(client: Client, groups: &[String]) -> Result<Self> {
        let mut discovery = Discovery::new(client);
        if !groups.is_empty() {
            let groups: Vec<&str> = groups.iter().map(String::as_str).collect();
            discovery = discovery.filter(&groups);
        }
        let discovery = discovery.run().await?;

        info!("Discovered {} API groups", discovery.groups().count());
        Ok(Self { discovery })
    }
}

impl RestMapper for DiscoveryRestMapper {
    fn mapping(&self, gvk: &GroupVersionKind) -> Result<RestMapping> {
        let (resource, caps) = self
            .discovery
            .resolve_gvk(gvk)
            .ok_or_else(|| Error::NoMapping(describe_gvk(gvk)))?;

        debug!("Resolved {} to {}", describe_gvk(gvk), resource.plural);
        Ok(RestMapping {
            resource,
            scope: caps.scope,
        })
    }
}
