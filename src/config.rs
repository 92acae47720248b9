// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as keys, DEFAULT_FIELD_MANAGER};
use anyhow::{ensure, Result};
use std::env;

/// Client configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Field manager used for server-side apply patches
    pub field_manager: String,
    /// API groups to discover REST mappings for, empty means all groups
    pub discovery_groups: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_manager: DEFAULT_FIELD_MANAGER.to_string(),
            discovery_groups: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let field_manager = lookup(keys::FIELD_MANAGER)
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_FIELD_MANAGER.to_string());
        ensure!(
            !field_manager.is_empty(),
            "{} must not be empty",
            keys::FIELD_MANAGER
        );

        let discovery_groups = lookup(keys::DISCOVERY_GROUPS)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|g| !g.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Config {
            field_manager,
            discovery_groups,
        })
    }
}
