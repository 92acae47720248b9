// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::core::GroupVersionKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to build request: {0}")]
    RequestError(#[from] kube::core::request::Error),

    #[error("Failed to (de)serialize object: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Object has no apiVersion/kind set")]
    MissingKind,

    #[error("Object has no metadata.name set")]
    MissingName,

    #[error("No kind is registered in the scheme for {0}")]
    NotRegistered(String),

    #[error("No REST mapping found for {0}")]
    NoMapping(String),

    #[error("Invalid field path {0}")]
    InvalidFieldPath(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Render a GVK as `group/version, Kind=kind`
pub(crate) fn describe_gvk(gvk: &GroupVersionKind) -> String {
    if gvk.group.is_empty() {
        format!("{}, Kind={}", gvk.version, gvk.kind)
    } else {
        format!("{}/{}, Kind={}", gvk.group, gvk.version, gvk.kind)
    }
}
