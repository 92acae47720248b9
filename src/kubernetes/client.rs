// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! `Client` implementation on top of `kube::Client`

use crate::client::{
    Client, DeleteAllOfOptions, ListObject, ListOptions, Object, ObjectKey, StatusWriter,
};
use crate::config::Config;
use crate::constants::{DEFAULT_FIELD_MANAGER, STATUS_SUBRESOURCE};
use crate::error::{describe_gvk, Error, Result};
use crate::kubernetes::mapper::{DiscoveryRestMapper, RestMapper, RestMapping};
use crate::kubernetes::scheme::Scheme;
use async_trait::async_trait;
use kube::api::{DeleteParams, Patch, PatchParams, PostParams};
use kube::core::params::GetParams;
use kube::core::{DynamicObject, GroupVersionKind, Request};
use kube::Resource;
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Talks to the API server with JSON bodies, using the scheme to vet typed
/// objects and the REST mapper to build request paths.
pub struct KubeClient {
    client: kube::Client,
    scheme: Scheme,
    mapper: Box<dyn RestMapper>,
    field_manager: String,
}

impl KubeClient {
    pub fn new(client: kube::Client, scheme: Scheme, mapper: impl RestMapper + 'static) -> Self {
        Self {
            client,
            scheme,
            mapper: Box::new(mapper),
            field_manager: DEFAULT_FIELD_MANAGER.to_string(),
        }
    }

    /// Field manager applied to server-side apply patches that carry none
    pub fn with_field_manager(mut self, field_manager: impl Into<String>) -> Self {
        self.field_manager = field_manager.into();
        self
    }

    /// Infer cluster access from the environment and discover REST mappings
    pub async fn try_default(config: &Config, scheme: Scheme) -> Result<Self> {
        let client = kube::Client::try_default().await?;
        info!("Connected to Kubernetes cluster");

        let mapper = DiscoveryRestMapper::run(client.clone(), &config.discovery_groups).await?;
        Ok(Self::new(client, scheme, mapper).with_field_manager(config.field_manager.clone()))
    }

    fn check_registered(&self, gvk: &GroupVersionKind, unstructured: bool) -> Result<()> {
        if unstructured || self.scheme.recognizes(gvk) {
            Ok(())
        } else {
            Err(Error::NotRegistered(describe_gvk(gvk)))
        }
    }

    fn resolve(&self, obj: &dyn Object) -> Result<RestMapping> {
        let gvk = obj.group_version_kind()?;
        self.check_registered(&gvk, obj.unstructured().is_some())?;
        self.mapper.mapping(&gvk)
    }

    fn request_for(&self, mapping: &RestMapping, namespace: Option<&str>) -> Request {
        let namespace = if mapping.is_namespaced() {
            Some(namespace.unwrap_or_else(|| self.client.default_namespace()))
        } else {
            None
        };
        Request::new(DynamicObject::url_path(&mapping.resource, namespace))
    }

    fn object_request(&self, obj: &dyn Object) -> Result<Request> {
        let mapping = self.resolve(obj)?;
        Ok(self.request_for(&mapping, obj.object_meta().namespace.as_deref()))
    }

    fn apply_params(&self, patch: &Patch<Value>, params: &PatchParams) -> PatchParams {
        let mut params = params.clone();
        if matches!(patch, Patch::Apply(_)) && params.field_manager.is_none() {
            params.field_manager = Some(self.field_manager.clone());
        }
        params
    }

    async fn send(&self, request: http::Request<Vec<u8>>) -> Result<Value> {
        Ok(self.client.request::<Value>(request).await?)
    }
}

fn object_name(obj: &dyn Object) -> Result<String> {
    obj.object_meta().name.clone().ok_or(Error::MissingName)
}

fn body_of(obj: &dyn Object) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&obj.to_value()?)?)
}

#[async_trait]
impl Client for KubeClient {
    #[instrument(skip(self, obj, params), fields(key = %key))]
    async fn get(&self, key: &ObjectKey, obj: &mut dyn Object, params: &GetParams) -> Result<()> {
        let mapping = self.resolve(&*obj)?;
        let request = self
            .request_for(&mapping, key.namespace.as_deref())
            .get(&key.name, params)?;
        obj.load_value(self.send(request).await?)
    }

    #[instrument(skip(self, list, opts))]
    async fn list(&self, list: &mut dyn ListObject, opts: &ListOptions) -> Result<()> {
        let gvk = list.item_group_version_kind()?;
        self.check_registered(&gvk, list.unstructured_list().is_some())?;
        let mapping = self.mapper.mapping(&gvk)?;

        // An unset namespace lists across all namespaces
        let namespace = if mapping.is_namespaced() {
            opts.namespace.as_deref()
        } else {
            None
        };
        let request = Request::new(DynamicObject::url_path(&mapping.resource, namespace))
            .list(&opts.params)?;

        debug!("Listing {}", describe_gvk(&gvk));
        list.load_value(self.send(request).await?)
    }

    async fn create(&self, obj: &mut dyn Object, params: &PostParams) -> Result<()> {
        let request = self.object_request(&*obj)?.create(params, body_of(&*obj)?)?;
        obj.load_value(self.send(request).await?)
    }

    async fn update(&self, obj: &mut dyn Object, params: &PostParams) -> Result<()> {
        let name = object_name(&*obj)?;
        let request = self
            .object_request(&*obj)?
            .replace(&name, params, body_of(&*obj)?)?;
        obj.load_value(self.send(request).await?)
    }

    async fn patch(
        &self,
        obj: &mut dyn Object,
        patch: &Patch<Value>,
        params: &PatchParams,
    ) -> Result<()> {
        let name = object_name(&*obj)?;
        let params = self.apply_params(patch, params);
        let request = self.object_request(&*obj)?.patch(&name, &params, patch)?;
        obj.load_value(self.send(request).await?)
    }

    async fn delete(&self, obj: &dyn Object, params: &DeleteParams) -> Result<()> {
        let name = object_name(obj)?;
        let request = self.object_request(obj)?.delete(&name, params)?;
        self.send(request).await?;
        debug!("Deleted {}", name);
        Ok(())
    }

    async fn delete_all_of(&self, obj: &dyn Object, opts: &DeleteAllOfOptions) -> Result<()> {
        let mapping = self.resolve(obj)?;
        let request = self
            .request_for(&mapping, opts.namespace.as_deref())
            .delete_collection(&opts.delete, &opts.list)?;
        self.send(request).await?;
        Ok(())
    }

    fn status(&self) -> Box<dyn StatusWriter + '_> {
        Box::new(KubeStatusWriter { kube: self })
    }

    fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    fn rest_mapper(&self) -> &dyn RestMapper {
        self.mapper.as_ref()
    }
}

/// Writes the status subresource through a [`KubeClient`]
struct KubeStatusWriter<'a> {
    kube: &'a KubeClient,
}

#[async_trait]
impl StatusWriter for KubeStatusWriter<'_> {
    async fn update(&self, obj: &mut dyn Object, params: &PostParams) -> Result<()> {
        let name = object_name(&*obj)?;
        let request = self.kube.object_request(&*obj)?.replace_subresource(
            STATUS_SUBRESOURCE,
            &name,
            params,
            body_of(&*obj)?,
        )?;
        obj.load_value(self.kube.send(request).await?)
    }

    async fn patch(
        &self,
        obj: &mut dyn Object,
        patch: &Patch<Value>,
        params: &PatchParams,
    ) -> Result<()> {
        let name = object_name(&*obj)?;
        let params = self.kube.apply_params(patch, params);
        let request = self.kube.object_request(&*obj)?.patch_subresource(
            STATUS_SUBRESOURCE,
            &name,
            &params,
            patch,
        )?;
        obj.load_value(self.kube.send(request).await?)
    }
}
