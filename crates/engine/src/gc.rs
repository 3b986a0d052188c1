// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Expiration-based reclamation of build directories
//!
//! Two phases. [`GarbageCollector::mark_expired`] moves expired tracking files
//! into `SourceRootMapping/GC`, which is the durable record that a build
//! directory is scheduled for deletion. [`GarbageCollector::dispose`] deletes
//! the build directory and then the record. Either phase can be interrupted
//! and rerun.

use pa_adapters::disk_usage;
use pa_core::Clock;
use pa_storage::layout::{self, resolve, TRACKING_FILE};
use pa_storage::{StoreError, TrackingConfigFile};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Errors from garbage collection
#[derive(Debug, Error)]
pub enum GcError {
    #[error("tracking store error: {0}")]
    Store(#[from] StoreError),
    #[error("{op} {path}: {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} is not a current-format tracking file")]
    UnexpectedFormat(PathBuf),
    #[error("{path} names build directory '{build_directory}' outside the work root")]
    InvalidBuildDirectory { path: PathBuf, build_directory: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkSummary {
    pub scanned: usize,
    pub marked: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisposeSummary {
    pub disposed: usize,
    pub failed: usize,
    pub cancelled: bool,
}

pub struct GarbageCollector<C: Clock> {
    work: PathBuf,
    clock: C,
}

impl<C: Clock> GarbageCollector<C> {
    pub fn new(work: impl Into<PathBuf>, clock: C) -> Self {
        Self {
            work: work.into(),
            clock,
        }
    }

    /// Schedule every tracking file not used within `expiration` for
    /// deletion. Legacy files are always scheduled.
    pub fn mark_expired(&self, expiration: Duration) -> Result<MarkSummary, GcError> {
        let now = self.clock.now();
        let cutoff = chrono::Duration::from_std(expiration)
            .ok()
            .and_then(|d| now.checked_sub_signed(d));
        let mut summary = MarkSummary::default();

        for file in tracking_files(&self.work)? {
            summary.scanned += 1;
            match self.mark_one(&file, cutoff) {
                Ok(true) => summary.marked += 1,
                Ok(false) => {}
                Err(e) => {
                    summary.failed += 1;
                    warn!(file = %file.display(), error = %e, "failed to mark tracking file");
                }
            }
        }
        info!(
            scanned = summary.scanned,
            marked = summary.marked,
            failed = summary.failed,
            "marked expired tracking files",
        );
        Ok(summary)
    }

    fn mark_one(&self, file: &Path, cutoff: Option<chrono::DateTime<chrono::Utc>>) -> Result<bool, GcError> {
        let Some(loaded) = TrackingConfigFile::load(file)? else {
            return Ok(false);
        };
        let eligible = match &loaded {
            TrackingConfigFile::Legacy(_) => true,
            TrackingConfigFile::Current(config) => cutoff.is_some_and(|c| c > config.last_run_on),
        };
        if !eligible {
            return Ok(false);
        }

        let config = loaded.into_current(self.clock.now());
        let record = layout::garbage_collection_directory(&self.work)
            .join(format!("{}.json", uuid::Uuid::new_v4()));
        config.save(&record)?;
        fs::remove_file(file).map_err(|source| GcError::Io {
            op: "remove",
            path: file.to_path_buf(),
            source,
        })?;
        info!(
            file = %file.display(),
            record = %record.display(),
            build_directory = %config.build_directory,
            last_run_on = %config.last_run_on,
            "scheduled build directory for deletion",
        );
        Ok(true)
    }

    /// Delete every scheduled build directory, stopping early if `cancel`
    /// fires. Per-entry failures are logged and skipped.
    pub fn dispose(&self, cancel: &CancellationToken) -> Result<DisposeSummary, GcError> {
        self.dispose_observed(cancel, |_| {})
    }

    /// [`GarbageCollector::dispose`], calling `after_entry` with each record
    /// path once it has been handled.
    fn dispose_observed(
        &self,
        cancel: &CancellationToken,
        mut after_entry: impl FnMut(&Path),
    ) -> Result<DisposeSummary, GcError> {
        self.log_disk_usage("before");
        let mut summary = DisposeSummary::default();

        for record in gc_records(&self.work)? {
            if cancel.is_cancelled() {
                info!("garbage collection cancelled");
                summary.cancelled = true;
                break;
            }
            match self.dispose_one(&record) {
                Ok(()) => summary.disposed += 1,
                Err(e) => {
                    summary.failed += 1;
                    error!(record = %record.display(), error = %e, "failed to dispose build directory");
                }
            }
            after_entry(&record);
        }

        info!(
            disposed = summary.disposed,
            failed = summary.failed,
            cancelled = summary.cancelled,
            "disposed scheduled build directories",
        );
        self.log_disk_usage("after");
        Ok(summary)
    }

    fn dispose_one(&self, record: &Path) -> Result<(), GcError> {
        let config = match TrackingConfigFile::load(record)? {
            Some(TrackingConfigFile::Current(config)) => config,
            _ => return Err(GcError::UnexpectedFormat(record.to_path_buf())),
        };
        if !is_contained(&config.build_directory) {
            return Err(GcError::InvalidBuildDirectory {
                path: record.to_path_buf(),
                build_directory: config.build_directory,
            });
        }

        let directory = resolve(&self.work, &config.build_directory);
        match fs::remove_dir_all(&directory) {
            Ok(()) => info!(directory = %directory.display(), "deleted build directory"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(GcError::Io {
                    op: "remove",
                    path: directory,
                    source,
                })
            }
        }
        fs::remove_file(record).map_err(|source| GcError::Io {
            op: "remove",
            path: record.to_path_buf(),
            source,
        })
    }

    fn log_disk_usage(&self, when: &str) {
        match disk_usage(&self.work) {
            Ok(usage) => info!(when, %usage, "disk usage"),
            Err(e) => warn!(when, error = %e, "failed to read disk usage"),
        }
    }
}

/// A build directory must resolve to a path below the work root.
fn is_contained(build_directory: &str) -> bool {
    let mut segments = build_directory
        .split(['/', '\\'])
        .filter(|s| !s.trim().is_empty())
        .peekable();
    segments.peek().is_some() && segments.all(|s| s != "." && s != ".." && !s.contains(':'))
}

/// Every tracking file under `SourceRootMapping`, excluding the GC directory.
pub(crate) fn tracking_files(work: &Path) -> Result<Vec<PathBuf>, GcError> {
    let root = layout::tracking_root(work);
    let gc = layout::garbage_collection_directory(work);
    let mut files = Vec::new();
    let mut pending = vec![root];

    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(source) => return Err(GcError::Io { op: "scan", path: dir, source }),
        };
        for entry in entries {
            let entry = entry.map_err(|source| GcError::Io {
                op: "scan",
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if is_dir {
                if path != gc {
                    pending.push(path);
                }
            } else if entry.file_name() == TRACKING_FILE {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

fn gc_records(work: &Path) -> Result<Vec<PathBuf>, GcError> {
    let gc = layout::garbage_collection_directory(work);
    let entries = match fs::read_dir(&gc) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(GcError::Io { op: "scan", path: gc, source }),
    };
    let mut records: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    records.sort();
    Ok(records)
}

#[cfg(test)]
#[path = "gc_tests.rs"]
mod tests;
