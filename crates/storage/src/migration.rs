// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracking file migration system for format evolution.
//!
//! Migrations transform tracking file JSON from one `fileFormatVersion` to
//! the next. The registry chains migrations to reach the current version.

use serde_json::{json, Map, Value};
use thiserror::Error;

pub(crate) const VERSION_KEY: &str = "fileFormatVersion";

/// Errors that can occur during migration
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("migration v{from}→v{to} failed: {reason}")]
    Failed { from: u32, to: u32, reason: String },
    #[error("no migration path from v{0} to v{1}")]
    NoPath(u32, u32),
    #[error("tracking file version {0} is newer than supported ({1})")]
    TooNew(u64, u32),
}

/// A migration from one tracking file version to the next.
pub trait Migration: Send + Sync {
    fn source_version(&self) -> u32;
    fn target_version(&self) -> u32;
    fn migrate(&self, config: &mut Value) -> Result<(), MigrationError>;
}

/// Registry of migrations for upgrading tracking files.
pub struct MigrationRegistry {
    migrations: Vec<Box<dyn Migration>>,
}

impl MigrationRegistry {
    /// Create a new registry with all known migrations.
    pub fn new() -> Self {
        Self {
            migrations: vec![Box::new(SingleRepositoryToResources)],
        }
    }

    /// Migrate a tracking file to the target version.
    pub fn migrate_to(&self, mut config: Value, target: u32) -> Result<Value, MigrationError> {
        let raw = config.get(VERSION_KEY).and_then(|v| v.as_u64()).unwrap_or(1);
        let current = u32::try_from(raw).map_err(|_| MigrationError::TooNew(raw, target))?;

        if current == target {
            return Ok(config);
        }
        if current > target {
            return Err(MigrationError::TooNew(current.into(), target));
        }

        let mut version = current;
        while version < target {
            let migration = self
                .migrations
                .iter()
                .find(|m| m.source_version() == version)
                .ok_or(MigrationError::NoPath(version, target))?;

            migration.migrate(&mut config)?;
            version = migration.target_version();

            if let Some(obj) = config.as_object_mut() {
                obj.insert(VERSION_KEY.into(), version.into());
            }
        }
        Ok(config)
    }
}

impl Default for MigrationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// v2 kept one repository in top-level `repositoryType`/`repositoryUrl`
/// fields. v3 moves it under `resources.repositories.self`.
struct SingleRepositoryToResources;

impl Migration for SingleRepositoryToResources {
    fn source_version(&self) -> u32 {
        2
    }

    fn target_version(&self) -> u32 {
        3
    }

    fn migrate(&self, config: &mut Value) -> Result<(), MigrationError> {
        let obj = config.as_object_mut().ok_or_else(|| MigrationError::Failed {
            from: 2,
            to: 3,
            reason: "tracking file is not a JSON object".to_string(),
        })?;

        let repository_type = take_string(obj, "repositoryType");
        let repository_url = take_string(obj, "repositoryUrl");
        let sources = obj
            .get("build_sourcesdirectory")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let mut repositories = Map::new();
        if let Some(url) = repository_url {
            repositories.insert(
                "self".to_string(),
                json!({
                    "repositoryType": repository_type.unwrap_or_default(),
                    "repositoryUrl": url,
                    "sourceDirectory": sources,
                }),
            );
        }
        obj.insert(
            "resources".to_string(),
            json!({ "repositories": repositories, "drops": {} }),
        );
        Ok(())
    }
}

fn take_string(obj: &mut Map<String, Value>, key: &str) -> Option<String> {
    obj.remove(key)
        .and_then(|v| v.as_str().map(str::to_string))
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "migration_tests.rs"]
mod tests;
