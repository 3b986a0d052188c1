// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job resources handed to the agent by the pipeline definition.
//!
//! These are read-only inputs: the workspace core records where each
//! resource lives on disk but never changes what the definition declares.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Alias the pipeline gives to the repository that holds the definition itself.
pub const SELF_ALIAS: &str = "self";

/// Repository types whose client cannot map one local path into several
/// concurrent workspaces on the same machine identity.
pub const LEGACY_VCS_TYPES: &[&str] = &["tfsversioncontrol"];

/// A source repository declared by the job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryResource {
    pub alias: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub repo_type: String,
    pub url: String,
    #[serde(default)]
    pub clean: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl RepositoryResource {
    pub fn new(alias: impl Into<String>, repo_type: impl Into<String>, url: impl Into<String>) -> Self {
        let alias = alias.into();
        Self {
            id: String::new(),
            name: alias.clone(),
            alias,
            repo_type: repo_type.into(),
            url: url.into(),
            clean: false,
            version: None,
            properties: BTreeMap::new(),
        }
    }

    /// Whether this repository is served by a legacy version-control system.
    pub fn is_legacy_vcs(&self) -> bool {
        LEGACY_VCS_TYPES
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&self.repo_type))
    }
}

/// A build drop (artifact set) consumed by the job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropResource {
    pub alias: String,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "type")]
    pub drop_type: String,
}

impl DropResource {
    pub fn new(alias: impl Into<String>, drop_type: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            version: version.into(),
            drop_type: drop_type.into(),
        }
    }
}

/// A service connection available to the job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEndpoint {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub endpoint_type: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}
