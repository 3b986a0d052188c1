// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake source provider for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{DirectorySourceProvider, SourceError, SourceProvider};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Recorded source provider call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceCall {
    MigrateSources { from: PathBuf, to: PathBuf },
    Destroy { directory: PathBuf },
    RunMaintenance { directory: PathBuf },
}

#[derive(Default)]
struct FakeSourceState {
    calls: Vec<SourceCall>,
    fail_maintenance: bool,
}

/// Records calls and performs them on the filesystem like
/// [`DirectorySourceProvider`], so tests can assert on both.
#[derive(Clone, Default)]
pub struct FakeSourceProvider {
    inner: Arc<Mutex<FakeSourceState>>,
}

impl FakeSourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<SourceCall> {
        self.inner.lock().calls.clone()
    }

    /// Make subsequent `run_maintenance` calls fail
    pub fn fail_maintenance(&self) {
        self.inner.lock().fail_maintenance = true;
    }
}

impl SourceProvider for FakeSourceProvider {
    fn migrate_sources(&self, from: &Path, to: &Path) -> Result<(), SourceError> {
        self.inner.lock().calls.push(SourceCall::MigrateSources {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
        DirectorySourceProvider.migrate_sources(from, to)
    }

    fn destroy(&self, directory: &Path) -> Result<(), SourceError> {
        self.inner.lock().calls.push(SourceCall::Destroy {
            directory: directory.to_path_buf(),
        });
        DirectorySourceProvider.destroy(directory)
    }

    fn run_maintenance(&self, directory: &Path) -> Result<(), SourceError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SourceCall::RunMaintenance {
            directory: directory.to_path_buf(),
        });
        if inner.fail_maintenance {
            return Err(SourceError::Maintenance {
                path: directory.to_path_buf(),
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}
