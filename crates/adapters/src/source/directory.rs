// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plain filesystem source provider

use super::{SourceError, SourceProvider};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Treats a repository directory as an opaque directory tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectorySourceProvider;

impl SourceProvider for DirectorySourceProvider {
    fn migrate_sources(&self, from: &Path, to: &Path) -> Result<(), SourceError> {
        // Stage next to `from` first so that `to` may be a child of `from`.
        let staging = staging_path(from);
        rename(from, &staging)?;
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent).map_err(|source| SourceError::Io {
                op: "create",
                path: parent.to_path_buf(),
                source,
            })?;
        }
        rename(&staging, to)?;
        tracing::info!(from = %from.display(), to = %to.display(), "migrated sources");
        Ok(())
    }

    fn destroy(&self, directory: &Path) -> Result<(), SourceError> {
        match fs::remove_dir_all(directory) {
            Ok(()) => {
                tracing::info!(path = %directory.display(), "removed sources");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SourceError::Io {
                op: "remove",
                path: directory.to_path_buf(),
                source,
            }),
        }
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_os_string();
    name.push(".migrating");
    PathBuf::from(name)
}

fn rename(from: &Path, to: &Path) -> Result<(), SourceError> {
    fs::rename(from, to).map_err(|source| SourceError::Io {
        op: "rename",
        path: from.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
