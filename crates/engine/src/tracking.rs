// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build directory allocation and tracking file lifecycle
//!
//! There is no cross-process lock on the counter. Two agents sharing a work
//! root can race; the loser is repaired on a later run by the directory scan.

use crate::context::ExecutionContext;
use crate::error::TrackingError;
use crate::reconcile::reconcile;
use crate::vars;
use pa_adapters::SourceProviders;
use pa_core::{Clock, RepositoryResource, ServiceEndpoint, SELF_ALIAS};
use pa_storage::layout::{self, resolve, SOURCES_DIRECTORY};
use pa_storage::{
    corrupted_path, DropTrackingConfig, RepositoryTrackingConfig, StoreError, TopLevelLoad,
    TopLevelTrackingConfig, TrackingConfig, TrackingConfigFile,
};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Stable key for a job definition's tracking file.
pub fn hash_key(collection_id: &str, definition_id: &str, repository_url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(collection_id.as_bytes());
    hasher.update(b":");
    hasher.update(definition_id.as_bytes());
    hasher.update(b":");
    hasher.update(repository_url.to_ascii_lowercase().as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

pub struct TrackingManager<C: Clock> {
    work: PathBuf,
    clock: C,
}

impl<C: Clock> TrackingManager<C> {
    pub fn new(work: impl Into<PathBuf>, clock: C) -> Self {
        Self {
            work: work.into(),
            clock,
        }
    }

    pub fn work_directory(&self) -> &Path {
        &self.work
    }

    pub fn tracking_file(&self, hash_key: &str) -> PathBuf {
        layout::tracking_file(&self.work, hash_key)
    }

    /// Allocate a new build directory for the job's resources.
    pub fn create(
        &self,
        ctx: &mut ExecutionContext,
        hash_key: &str,
        file: &Path,
    ) -> Result<TrackingConfig, TrackingError> {
        let number = self.next_build_number(ctx, ctx.requires_hosted_override())?;
        let repositories = ctx.repositories.clone();
        self.create_with(ctx, number, hash_key, file, &repositories)
    }

    /// Allocate a new build directory keyed by a service endpoint.
    ///
    /// The endpoint stands in for the job's single repository under the
    /// `self` alias.
    pub fn create_for_endpoint(
        &self,
        ctx: &mut ExecutionContext,
        endpoint: &ServiceEndpoint,
        hash_key: &str,
        file: &Path,
        override_build_directory: bool,
    ) -> Result<TrackingConfig, TrackingError> {
        let hosted = override_build_directory || ctx.requires_hosted_override();
        let number = self.next_build_number(ctx, hosted)?;
        let mut repository =
            RepositoryResource::new(SELF_ALIAS, endpoint.endpoint_type.as_str(), endpoint.url.as_str());
        repository.id = endpoint.id.clone();
        repository.name = endpoint.name.clone();
        self.create_with(ctx, number, hash_key, file, &[repository])
    }

    fn create_with(
        &self,
        ctx: &mut ExecutionContext,
        number: u64,
        hash_key: &str,
        file: &Path,
        repositories: &[RepositoryResource],
    ) -> Result<TrackingConfig, TrackingError> {
        let mut config = TrackingConfig::new(number, hash_key, self.clock.now());
        config.collection_id = variable(ctx, vars::COLLECTION_ID);
        config.collection_url = variable(ctx, vars::COLLECTION_URL);
        config.definition_id = variable(ctx, vars::DEFINITION_ID);
        config.definition_name = variable(ctx, vars::DEFINITION_NAME);

        let multi_repository = repositories.len() > 1;
        for repo in repositories {
            let source_directory = config.repository_directory(&repo.alias, multi_repository);
            config.resources.repositories.insert(
                repo.alias.clone(),
                RepositoryTrackingConfig {
                    repository_type: repo.repo_type.clone(),
                    repository_url: repo.url.clone(),
                    source_directory,
                },
            );
        }
        for drop in &ctx.drops {
            let drop_directory = config.drop_directory(&drop.alias);
            config
                .resources
                .drops
                .insert(drop.alias.clone(), DropTrackingConfig { drop_directory });
        }

        config.save(file)?;
        info!(
            build_directory = %config.build_directory,
            file = %file.display(),
            repositories = config.resources.repositories.len(),
            "created tracking file",
        );
        let drops = ctx.drops.clone();
        vars::project(&mut ctx.variables, &self.work, &config, repositories, &drops)?;
        Ok(config)
    }

    /// Read the counter, rebuilding it from the work root when needed, and
    /// persist the number handed out.
    fn next_build_number(&self, ctx: &ExecutionContext, hosted_override: bool) -> Result<u64, TrackingError> {
        let path = layout::top_level_tracking_file(&self.work);
        let counter = match TopLevelTrackingConfig::load(&path)? {
            TopLevelLoad::Loaded(config) => config.last_build_directory_number,
            TopLevelLoad::Missing => self.scan_build_directories()?,
            TopLevelLoad::Corrupt { preserved } => {
                let max = self.scan_build_directories()?;
                warn!(preserved = %preserved.display(), rebuilt = max, "rebuilt build directory counter");
                max
            }
        };

        let number = if hosted_override {
            if counter != 0 {
                return Err(TrackingError::CounterNotDefault(counter));
            }
            info!(agent_id = ctx.settings.agent_id, "hosted override, using agent id as build directory");
            ctx.settings.agent_id
        } else {
            counter.checked_add(1).ok_or(TrackingError::CounterExhausted(counter))?
        };

        TopLevelTrackingConfig {
            last_build_directory_created_on: self.clock.now(),
            last_build_directory_number: number,
        }
        .save(&path)?;
        Ok(number)
    }

    /// Largest integer-named directory directly under the work root.
    fn scan_build_directories(&self) -> Result<u64, TrackingError> {
        let entries = match fs::read_dir(&self.work) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(TrackingError::Io {
                    op: "scan",
                    path: self.work.clone(),
                    source,
                })
            }
        };
        let max = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .filter_map(|e| e.file_name().to_str()?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Ok(max)
    }

    /// Load the tracking file at `file` in the current format.
    ///
    /// A legacy file is converted, keeping its build directory, and saved
    /// back. A current-format file that fails to parse is preserved as
    /// `<file>.corrupted` and treated as absent.
    pub fn load_existing(
        &self,
        ctx: &ExecutionContext,
        file: &Path,
    ) -> Result<Option<TrackingConfig>, TrackingError> {
        match TrackingConfigFile::load(file) {
            Ok(None) => Ok(None),
            Ok(Some(TrackingConfigFile::Current(config))) => Ok(Some(config)),
            Ok(Some(TrackingConfigFile::Legacy(legacy))) => {
                let repository_type = ctx
                    .repository(SELF_ALIAS)
                    .map(|r| r.repo_type.as_str())
                    .unwrap_or_default();
                let config = TrackingConfig::from_legacy(
                    &legacy,
                    SOURCES_DIRECTORY,
                    repository_type,
                    self.clock.now(),
                );
                config.save(file)?;
                info!(
                    build_directory = %config.build_directory,
                    file = %file.display(),
                    "converted legacy tracking file",
                );
                Ok(Some(config))
            }
            Err(StoreError::Json(e)) => {
                let preserved = corrupted_path(file);
                warn!(
                    error = %e,
                    file = %file.display(),
                    preserved = %preserved.display(),
                    "corrupt tracking file, allocating a new build directory",
                );
                fs::copy(file, &preserved).map_err(|source| TrackingError::Io {
                    op: "preserve",
                    path: file.to_path_buf(),
                    source,
                })?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Bring an existing config in line with this run and save it.
    pub fn update_job_run(
        &self,
        ctx: &mut ExecutionContext,
        mut config: TrackingConfig,
        file: &Path,
        providers: &SourceProviders,
    ) -> Result<TrackingConfig, TrackingError> {
        reconcile(ctx, &self.work, &mut config, providers)?;
        if let Some(name) = ctx.variables.get(vars::DEFINITION_NAME) {
            config.definition_name = name.to_string();
        }
        config.last_run_on = self.clock.now();
        config.save(file)?;
        Ok(config)
    }

    pub fn maintenance_started(&self, config: &mut TrackingConfig, file: &Path) -> Result<(), TrackingError> {
        config.last_maintenance_attempted_on = Some(self.clock.now());
        config.save(file)?;
        Ok(())
    }

    pub fn maintenance_completed(&self, config: &mut TrackingConfig, file: &Path) -> Result<(), TrackingError> {
        config.last_maintenance_completed_on = Some(self.clock.now());
        config.save(file)?;
        Ok(())
    }

    /// Job-start entry point: reuse the definition's build directory if it
    /// has one, otherwise allocate a new one. The build directory's standard
    /// subdirectories exist on return.
    pub fn prepare(
        &self,
        ctx: &mut ExecutionContext,
        hash_key: &str,
        file: &Path,
        providers: &SourceProviders,
    ) -> Result<TrackingConfig, TrackingError> {
        let config = match self.load_existing(ctx, file)? {
            Some(mut config) => {
                if config.hash_key.is_empty() {
                    config.hash_key = hash_key.to_string();
                }
                self.update_job_run(ctx, config, file, providers)?
            }
            None => self.create(ctx, hash_key, file)?,
        };

        for dir in [
            &config.sources_directory,
            &config.artifacts_directory,
            &config.test_results_directory,
        ] {
            let path = resolve(&self.work, dir);
            fs::create_dir_all(&path).map_err(|source| TrackingError::Io {
                op: "create",
                path,
                source,
            })?;
        }
        Ok(config)
    }
}

fn variable(ctx: &ExecutionContext, name: &str) -> String {
    ctx.variables.get(name).unwrap_or_default().to_string()
}

#[cfg(test)]
#[path = "tracking_tests.rs"]
mod tests;
