// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Field manager used for server-side apply when none is configured
pub const DEFAULT_FIELD_MANAGER: &str = "unstructured-client";

/// Name of the status subresource
pub const STATUS_SUBRESOURCE: &str = "status";

/// Suffix the API server appends to a kind for its list type
pub const LIST_SUFFIX: &str = "List";

/// Environment variables read by [`crate::config::Config`]
pub mod env {
    /// Field manager name for server-side apply patches
    pub const FIELD_MANAGER: &str = "FIELD_MANAGER";
    /// Comma separated API groups to run discovery for (empty means all)
    pub const DISCOVERY_GROUPS: &str = "DISCOVERY_GROUPS";
}
