// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level build directory counter, one per work root.

use crate::file::{write_json, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopLevelTrackingConfig {
    #[serde(rename = "lastBuildFolderCreatedOn", default)]
    pub last_build_directory_created_on: DateTime<Utc>,
    #[serde(rename = "lastBuildFolderNumber")]
    pub last_build_directory_number: u64,
}

/// Outcome of reading the counter file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopLevelLoad {
    Missing,
    Loaded(TopLevelTrackingConfig),
    /// The file could not be parsed. A copy was kept at `preserved`.
    Corrupt { preserved: PathBuf },
}

impl TopLevelTrackingConfig {
    /// Load the counter file.
    ///
    /// A corrupt file is copied to `<file>.corrupted` (replacing an older
    /// copy) so it survives the rewrite that follows.
    pub fn load(path: &Path) -> Result<TopLevelLoad, StoreError> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(TopLevelLoad::Missing),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<TopLevelTrackingConfig>(&content) {
            Ok(config) => Ok(TopLevelLoad::Loaded(config)),
            Err(e) => {
                let preserved = corrupted_path(path);
                warn!(
                    error = %e,
                    path = %path.display(),
                    preserved = %preserved.display(),
                    "corrupt top-level tracking file, keeping a copy",
                );
                fs::copy(path, &preserved)?;
                Ok(TopLevelLoad::Corrupt { preserved })
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        write_json(path, self)
    }
}

pub fn corrupted_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".corrupted");
    PathBuf::from(name)
}

#[cfg(test)]
#[path = "top_level_tests.rs"]
mod tests;
