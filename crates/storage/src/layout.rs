// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk layout of the tracking directory under an agent work root.
//!
//! ```text
//! <work>/
//!   SourceRootMapping/
//!     Mappings.json                 top-level build directory counter
//!     <hash key>/SourceFolder.json  one tracking file per job definition
//!     GC/<uuid>.json                configs scheduled for deletion
//!   1/
//!     a/  s/  TestResults/          build directory of one definition
//! ```

use std::path::{Path, PathBuf};

pub const TRACKING_DIRECTORY: &str = "SourceRootMapping";
pub const TOP_LEVEL_TRACKING_FILE: &str = "Mappings.json";
pub const TRACKING_FILE: &str = "SourceFolder.json";
pub const GARBAGE_COLLECTION_DIRECTORY: &str = "GC";

pub const ARTIFACTS_DIRECTORY: &str = "a";
pub const SOURCES_DIRECTORY: &str = "s";
pub const TEST_RESULTS_DIRECTORY: &str = "TestResults";

pub fn tracking_root(work: &Path) -> PathBuf {
    work.join(TRACKING_DIRECTORY)
}

pub fn top_level_tracking_file(work: &Path) -> PathBuf {
    tracking_root(work).join(TOP_LEVEL_TRACKING_FILE)
}

pub fn garbage_collection_directory(work: &Path) -> PathBuf {
    tracking_root(work).join(GARBAGE_COLLECTION_DIRECTORY)
}

/// Tracking file for the job definition identified by `hash_key`.
pub fn tracking_file(work: &Path, hash_key: &str) -> PathBuf {
    tracking_root(work).join(hash_key).join(TRACKING_FILE)
}

/// Join two work-root-relative directory names.
///
/// Tracking files always store `/`-separated relative paths so they read the
/// same on every platform.
pub fn join_relative(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches(['/', '\\']), name)
    }
}

/// Absolute path of a work-root-relative directory.
pub fn resolve(work: &Path, relative: &str) -> PathBuf {
    relative
        .split(['/', '\\'])
        .filter(|s| !s.is_empty())
        .fold(work.to_path_buf(), |acc, part| acc.join(part))
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
