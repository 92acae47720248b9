// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes backed client, type registry and REST mapping.

pub mod client;
pub mod mapper;
pub mod scheme;

pub use client::KubeClient;
pub use mapper::{DiscoveryRestMapper, RestMapper, RestMapping, StaticRestMapper};
pub use scheme::Scheme;
