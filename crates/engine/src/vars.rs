// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job variables read and written by the workspace core

use crate::error::TrackingError;
use pa_core::{DropResource, RepositoryResource, Variables};
use pa_storage::layout::resolve;
use pa_storage::TrackingConfig;
use std::path::Path;

pub const COLLECTION_ID: &str = "system.collectionId";
pub const COLLECTION_URL: &str = "system.collectionUri";
pub const DEFINITION_ID: &str = "system.definitionId";
pub const DEFINITION_NAME: &str = "build.definitionName";

/// `system.repository.<alias>.<field>`
pub fn repository_variable(alias: &str, field: &str) -> String {
    format!("system.repository.{alias}.{field}")
}

/// `system.build.<alias>.<field>`
pub fn drop_variable(alias: &str, field: &str) -> String {
    format!("system.build.{alias}.{field}")
}

/// Project every tracked resource into job variables.
///
/// Each recorded alias must be declared by the job; its `localpath` is the
/// recorded directory under `work`.
pub fn project(
    variables: &mut Variables,
    work: &Path,
    config: &TrackingConfig,
    repositories: &[RepositoryResource],
    drops: &[DropResource],
) -> Result<(), TrackingError> {
    for (alias, record) in &config.resources.repositories {
        let repo = repositories
            .iter()
            .find(|r| &r.alias == alias)
            .ok_or_else(|| TrackingError::ResourceMismatch {
                kind: "repository",
                alias: alias.clone(),
            })?;
        let local_path = resolve(work, &record.source_directory);
        variables.set(repository_variable(alias, "id"), repo.id.as_str());
        variables.set(repository_variable(alias, "name"), repo.name.as_str());
        variables.set(repository_variable(alias, "provider"), repo.repo_type.as_str());
        variables.set(repository_variable(alias, "uri"), repo.url.as_str());
        variables.set(repository_variable(alias, "clean"), repo.clean.to_string());
        variables.set(
            repository_variable(alias, "localpath"),
            local_path.display().to_string(),
        );
    }

    for (alias, record) in &config.resources.drops {
        let drop = drops
            .iter()
            .find(|d| &d.alias == alias)
            .ok_or_else(|| TrackingError::ResourceMismatch {
                kind: "drop",
                alias: alias.clone(),
            })?;
        let local_path = resolve(work, &record.drop_directory);
        variables.set(drop_variable(alias, "version"), drop.version.as_str());
        variables.set(drop_variable(alias, "type"), drop.drop_type.as_str());
        variables.set(
            drop_variable(alias, "localpath"),
            local_path.display().to_string(),
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "vars_tests.rs"]
mod tests;
