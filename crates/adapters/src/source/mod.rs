// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Source providers: per repository type operations on checked-out sources

mod directory;

pub use directory::DirectorySourceProvider;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeSourceProvider, SourceCall};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors from source provider operations
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{op} {path}: {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("maintenance failed for {path}: {reason}")]
    Maintenance { path: PathBuf, reason: String },
}

/// Operations the workspace core needs from a repository type.
///
/// Checkout itself is not part of this contract.
pub trait SourceProvider: Send + Sync {
    /// Move the contents of `from` to `to`. `to` may lie inside `from`.
    fn migrate_sources(&self, from: &Path, to: &Path) -> Result<(), SourceError>;

    /// Remove a repository directory that is no longer tracked.
    fn destroy(&self, directory: &Path) -> Result<(), SourceError>;

    /// Periodic upkeep of an existing repository directory.
    /// Default implementation is a no-op.
    fn run_maintenance(&self, _directory: &Path) -> Result<(), SourceError> {
        Ok(())
    }
}

/// Source providers keyed by repository type (case-insensitive).
///
/// Types without a registered provider, including the empty type recorded
/// for converted legacy files, use the fallback.
#[derive(Clone)]
pub struct SourceProviders {
    by_type: HashMap<String, Arc<dyn SourceProvider>>,
    fallback: Arc<dyn SourceProvider>,
}

impl SourceProviders {
    pub fn new(fallback: Arc<dyn SourceProvider>) -> Self {
        Self {
            by_type: HashMap::new(),
            fallback,
        }
    }

    pub fn with(mut self, repository_type: &str, provider: Arc<dyn SourceProvider>) -> Self {
        self.by_type
            .insert(repository_type.to_ascii_lowercase(), provider);
        self
    }

    pub fn get(&self, repository_type: &str) -> &dyn SourceProvider {
        self.by_type
            .get(&repository_type.to_ascii_lowercase())
            .unwrap_or(&self.fallback)
            .as_ref()
    }
}

impl Default for SourceProviders {
    fn default() -> Self {
        Self::new(Arc::new(DirectorySourceProvider))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
