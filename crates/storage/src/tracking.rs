// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Current-format tracking config: one job definition's workspace mapping.

use crate::file::{write_json, StoreError};
use crate::layout::{
    join_relative, ARTIFACTS_DIRECTORY, SOURCES_DIRECTORY, TEST_RESULTS_DIRECTORY,
};
use crate::legacy::LegacyTrackingConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Format version written by this agent. Its presence distinguishes the
/// current format from the legacy one.
pub const CURRENT_FORMAT_VERSION: u32 = 3;

/// Per-repository record, keyed by alias in [`Resources::repositories`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryTrackingConfig {
    #[serde(rename = "repositoryType", default)]
    pub repository_type: String,
    #[serde(rename = "repositoryUrl", default)]
    pub repository_url: String,
    /// Relative to the work root.
    #[serde(rename = "sourceDirectory")]
    pub source_directory: String,
}

/// Per-drop record, keyed by alias in [`Resources::drops`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTrackingConfig {
    /// Relative to the work root.
    #[serde(rename = "dropDirectory")]
    pub drop_directory: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    #[serde(default)]
    pub repositories: BTreeMap<String, RepositoryTrackingConfig>,
    #[serde(default)]
    pub drops: BTreeMap<String, DropTrackingConfig>,
}

/// Persisted workspace mapping for one job definition.
///
/// Field names are part of the on-disk contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingConfig {
    #[serde(rename = "fileFormatVersion")]
    pub file_format_version: u32,
    #[serde(rename = "agent_builddirectory")]
    pub build_directory: String,
    #[serde(rename = "build_artifactstagingdirectory", default)]
    pub artifacts_directory: String,
    #[serde(rename = "build_sourcesdirectory")]
    pub sources_directory: String,
    #[serde(rename = "common_testresultsdirectory", default)]
    pub test_results_directory: String,
    #[serde(rename = "hashKey", default)]
    pub hash_key: String,
    #[serde(default)]
    pub system: String,
    #[serde(rename = "collectionId", default)]
    pub collection_id: String,
    #[serde(rename = "collectionUrl", default)]
    pub collection_url: String,
    #[serde(rename = "definitionId", default)]
    pub definition_id: String,
    #[serde(rename = "definitionName", default)]
    pub definition_name: String,
    #[serde(rename = "lastRunOn")]
    pub last_run_on: DateTime<Utc>,
    #[serde(
        rename = "lastMaintenanceAttemptedOn",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_maintenance_attempted_on: Option<DateTime<Utc>>,
    #[serde(
        rename = "lastMaintenanceCompletedOn",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_maintenance_completed_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resources: Resources,
}

impl TrackingConfig {
    /// New config for build directory `<number>` with no resources recorded.
    pub fn new(build_number: u64, hash_key: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::with_directories(build_number.to_string(), SOURCES_DIRECTORY, hash_key.into(), now)
    }

    fn with_directories(
        build_directory: String,
        sources_name: &str,
        hash_key: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            file_format_version: CURRENT_FORMAT_VERSION,
            artifacts_directory: join_relative(&build_directory, ARTIFACTS_DIRECTORY),
            sources_directory: join_relative(&build_directory, sources_name),
            test_results_directory: join_relative(&build_directory, TEST_RESULTS_DIRECTORY),
            build_directory,
            hash_key,
            system: "build".to_string(),
            collection_id: String::new(),
            collection_url: String::new(),
            definition_id: String::new(),
            definition_name: String::new(),
            last_run_on: now,
            last_maintenance_attempted_on: None,
            last_maintenance_completed_on: None,
            resources: Resources::default(),
        }
    }

    /// Convert a legacy record into the current format.
    ///
    /// Legacy files never recorded the repository type, so the caller
    /// supplies it (empty when unknown). The build directory is preserved.
    pub fn from_legacy(
        legacy: &LegacyTrackingConfig,
        sources_name: &str,
        repository_type: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let mut config = Self::with_directories(
            legacy.build_directory.clone(),
            sources_name,
            legacy.hash_key.clone().unwrap_or_default(),
            now,
        );
        if let Some(system) = &legacy.system {
            config.system = system.clone();
        }
        config.collection_id = legacy.collection_id.clone().unwrap_or_default();
        config.definition_id = legacy.definition_id.clone().unwrap_or_default();
        if let Some(url) = &legacy.repository_url {
            config.resources.repositories.insert(
                "self".to_string(),
                RepositoryTrackingConfig {
                    repository_type: repository_type.to_string(),
                    repository_url: url.clone(),
                    source_directory: config.sources_directory.clone(),
                },
            );
        }
        config
    }

    /// Directory a repository with `alias` gets in this build directory.
    ///
    /// A single-repository job checks out straight into the sources root;
    /// with several repositories each gets its own subdirectory.
    pub fn repository_directory(&self, alias: &str, multi_repository: bool) -> String {
        if multi_repository {
            join_relative(&self.sources_directory, alias)
        } else {
            self.sources_directory.clone()
        }
    }

    pub fn drop_directory(&self, alias: &str) -> String {
        join_relative(&self.artifacts_directory, alias)
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        write_json(path, self)
    }
}

#[cfg(test)]
#[path = "tracking_tests.rs"]
mod tests;
