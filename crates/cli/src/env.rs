// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use pa_core::{AgentSettings, SettingsError, SETTINGS_FILE};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DAY_SECS: u64 = 24 * 60 * 60;

/// Work folder used when the agent settings do not name one.
pub const DEFAULT_WORK_FOLDER: &str = "_work";
pub const DEFAULT_EXPIRATION_DAYS: u64 = 30;
pub const DEFAULT_MAINTENANCE_DAYS: u64 = 1;

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

fn parse_days(var: &str) -> Option<u64> {
    non_empty(var).and_then(|s| s.parse::<u64>().ok())
}

pub fn days(n: u64) -> Duration {
    Duration::from_secs(n.saturating_mul(DAY_SECS))
}

// --- Agent root and work directory ---

/// Agent root: PA_ROOT > current directory
pub fn root_dir() -> PathBuf {
    non_empty("PA_ROOT")
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Work root: PA_WORK_DIR > `<root>/<settings work folder>` > `<root>/_work`
pub fn work_dir() -> Result<PathBuf, SettingsError> {
    if let Some(dir) = non_empty("PA_WORK_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let root = root_dir();
    let settings = AgentSettings::load(&root.join(SETTINGS_FILE))?;
    Ok(resolve_work_dir(&root, &settings))
}

/// A relative work folder is taken relative to the agent root.
pub fn resolve_work_dir(root: &Path, settings: &AgentSettings) -> PathBuf {
    if settings.work_folder.trim().is_empty() {
        root.join(DEFAULT_WORK_FOLDER)
    } else {
        root.join(&settings.work_folder)
    }
}

// --- Retention ---

pub fn gc_expiration_days() -> Option<u64> {
    parse_days("PA_GC_EXPIRATION_DAYS")
}

pub fn maintenance_days() -> Option<u64> {
    parse_days("PA_MAINTENANCE_DAYS")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
