// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maintenance job: garbage collection plus per-definition source upkeep

use crate::error::TrackingError;
use crate::gc::{tracking_files, DisposeSummary, GarbageCollector, GcError, MarkSummary};
use crate::tracking::TrackingManager;
use pa_adapters::SourceProviders;
use pa_core::Clock;
use pa_storage::layout::resolve;
use pa_storage::{TrackingConfig, TrackingConfigFile};
use std::path::Path;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceOptions {
    /// Build directories unused for longer than this are reclaimed.
    pub expiration: Duration,
    /// Minimum time between maintenance attempts on one definition.
    pub maintenance_interval: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaintenanceSummary {
    pub mark: MarkSummary,
    pub dispose: DisposeSummary,
    pub maintained: usize,
    pub failed: usize,
}

pub fn run_maintenance<C: Clock>(
    work: &Path,
    clock: &C,
    options: &MaintenanceOptions,
    providers: &SourceProviders,
    cancel: &CancellationToken,
) -> Result<MaintenanceSummary, GcError> {
    let gc = GarbageCollector::new(work, clock.clone());
    let mark = gc.mark_expired(options.expiration)?;
    let dispose = gc.dispose(cancel)?;
    let mut summary = MaintenanceSummary {
        mark,
        dispose,
        ..MaintenanceSummary::default()
    };
    if dispose.cancelled {
        return Ok(summary);
    }

    let manager = TrackingManager::new(work, clock.clone());
    let now = clock.now();
    let cutoff = chrono::Duration::from_std(options.maintenance_interval)
        .ok()
        .and_then(|d| now.checked_sub_signed(d));

    for file in tracking_files(work)? {
        if cancel.is_cancelled() {
            info!("maintenance cancelled");
            break;
        }
        let mut config = match TrackingConfigFile::load(&file) {
            Ok(Some(TrackingConfigFile::Current(config))) => config,
            Ok(_) => continue,
            Err(e) => {
                warn!(file = %file.display(), error = %e, "skipping unreadable tracking file");
                summary.failed += 1;
                continue;
            }
        };
        let due = match (config.last_maintenance_attempted_on, cutoff) {
            (None, _) => true,
            (Some(attempted), Some(cutoff)) => cutoff > attempted,
            (Some(_), None) => false,
        };
        if !due {
            continue;
        }

        match maintain(&manager, work, &mut config, &file, providers) {
            Ok(()) => summary.maintained += 1,
            Err(e) => {
                summary.failed += 1;
                warn!(
                    file = %file.display(),
                    build_directory = %config.build_directory,
                    error = %e,
                    "maintenance failed",
                );
            }
        }
    }

    info!(
        maintained = summary.maintained,
        failed = summary.failed,
        "maintenance finished",
    );
    Ok(summary)
}

fn maintain<C: Clock>(
    manager: &TrackingManager<C>,
    work: &Path,
    config: &mut TrackingConfig,
    file: &Path,
    providers: &SourceProviders,
) -> Result<(), TrackingError> {
    manager.maintenance_started(config, file)?;
    for (alias, record) in &config.resources.repositories {
        let directory = resolve(work, &record.source_directory);
        if !directory.is_dir() {
            continue;
        }
        info!(alias = %alias, directory = %directory.display(), "running repository maintenance");
        providers
            .get(&record.repository_type)
            .run_maintenance(&directory)?;
    }
    manager.maintenance_completed(config, file)
}

#[cfg(test)]
#[path = "maintenance_tests.rs"]
mod tests;
