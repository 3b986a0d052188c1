// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent settings written at configuration time.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// File name of the settings file in the agent root.
pub const SETTINGS_FILE: &str = ".agent";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read agent settings {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid agent settings {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Agent registration as stored in `<root>/.agent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentSettings {
    /// Server-assigned identifier, unique across concurrently running agents.
    pub agent_id: u64,
    pub agent_name: String,
    pub pool_id: u64,
    pub server_url: String,
    pub work_folder: String,
    /// Whether the agent runs on shared hosted infrastructure.
    pub is_hosted: bool,
}

impl AgentSettings {
    /// Load settings, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        serde_json::from_str(&content).map_err(|source| SettingsError::Json {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
