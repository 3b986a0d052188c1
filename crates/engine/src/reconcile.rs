// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconcile an existing tracking config with the job's declared resources
//!
//! Not atomic. A failure part way leaves the saved config untouched, and the
//! next run re-derives the same changes.

use crate::context::ExecutionContext;
use crate::error::TrackingError;
use crate::vars;
use pa_adapters::SourceProviders;
use pa_core::{DropResource, RepositoryResource, SELF_ALIAS};
use pa_storage::layout::{join_relative, resolve};
use pa_storage::{DropTrackingConfig, RepositoryTrackingConfig, TrackingConfig};
use std::path::Path;
use tracing::{info, warn};

/// Update `config` for this run and re-project the resource variables.
///
/// Running it twice with the same job changes nothing the second time.
pub fn reconcile(
    ctx: &mut ExecutionContext,
    work: &Path,
    config: &mut TrackingConfig,
    providers: &SourceProviders,
) -> Result<(), TrackingError> {
    migrate_topology(work, config, &ctx.repositories, providers)?;
    remove_stale_repositories(work, config, &ctx.repositories, providers)?;
    add_missing_repositories(config, &ctx.repositories);
    reconcile_drops(config, &ctx.drops);
    vars::project(&mut ctx.variables, work, config, &ctx.repositories, &ctx.drops)
}

/// Single to multi repository: the `self` checkout moves from the sources
/// root into `<sources>/self`. Never reversed.
fn migrate_topology(
    work: &Path,
    config: &mut TrackingConfig,
    repositories: &[RepositoryResource],
    providers: &SourceProviders,
) -> Result<(), TrackingError> {
    if config.resources.repositories.len() != 1 || repositories.len() <= 1 {
        return Ok(());
    }
    let sources = config.sources_directory.clone();
    let Some(record) = config.resources.repositories.get_mut(SELF_ALIAS) else {
        if let Some((alias, _)) = config
            .resources
            .repositories
            .iter()
            .find(|(_, r)| r.source_directory == sources)
        {
            warn!(alias = %alias, "lone repository in the sources root is not 'self', not migrating");
        }
        return Ok(());
    };
    if record.source_directory != sources {
        return Ok(());
    }

    let target = join_relative(&sources, SELF_ALIAS);
    let from = resolve(work, &record.source_directory);
    if from.exists() {
        providers
            .get(&record.repository_type)
            .migrate_sources(&from, &resolve(work, &target))?;
    }
    info!(from = %record.source_directory, to = %target, "moved self repository for multi-repository layout");
    record.source_directory = target;
    Ok(())
}

/// Destroy repositories the job no longer declares, or whose URL changed.
fn remove_stale_repositories(
    work: &Path,
    config: &mut TrackingConfig,
    repositories: &[RepositoryResource],
    providers: &SourceProviders,
) -> Result<(), TrackingError> {
    let stale: Vec<String> = config
        .resources
        .repositories
        .iter()
        .filter(|(alias, record)| {
            match repositories.iter().find(|r| &r.alias == *alias) {
                Some(repo) => !repo.url.eq_ignore_ascii_case(&record.repository_url),
                None => true,
            }
        })
        .map(|(alias, _)| alias.clone())
        .collect();

    for alias in stale {
        let Some(record) = config.resources.repositories.get(&alias) else {
            continue;
        };
        info!(
            alias = %alias,
            url = %record.repository_url,
            directory = %record.source_directory,
            "removing stale repository",
        );
        providers
            .get(&record.repository_type)
            .destroy(&resolve(work, &record.source_directory))?;
        config.resources.repositories.remove(&alias);
    }
    Ok(())
}

fn add_missing_repositories(config: &mut TrackingConfig, repositories: &[RepositoryResource]) {
    let single = repositories.len() == 1 && config.resources.repositories.is_empty();
    for repo in repositories {
        if config.resources.repositories.contains_key(&repo.alias) {
            continue;
        }
        let source_directory = config.repository_directory(&repo.alias, !single);
        info!(alias = %repo.alias, directory = %source_directory, "tracking new repository");
        config.resources.repositories.insert(
            repo.alias.clone(),
            RepositoryTrackingConfig {
                repository_type: repo.repo_type.clone(),
                repository_url: repo.url.clone(),
                source_directory,
            },
        );
    }
}

/// Drop records follow the job. Their directories are left alone.
fn reconcile_drops(config: &mut TrackingConfig, drops: &[DropResource]) {
    config
        .resources
        .drops
        .retain(|alias, _| drops.iter().any(|d| &d.alias == alias));
    for drop in drops {
        if !config.resources.drops.contains_key(&drop.alias) {
            let drop_directory = config.drop_directory(&drop.alias);
            config
                .resources
                .drops
                .insert(drop.alias.clone(), DropTrackingConfig { drop_directory });
        }
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
