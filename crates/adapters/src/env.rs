// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use std::path::PathBuf;

const DEFAULT_PLUGIN_HOST: &str = "pa-plugin-host";

/// Plugin host executable (default: `pa-plugin-host` from `PATH`).
pub fn plugin_host_program() -> PathBuf {
    std::env::var_os("PA_PLUGIN_HOST")
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PLUGIN_HOST))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
