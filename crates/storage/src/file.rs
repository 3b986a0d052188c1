// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loading and saving tracking files.

use crate::layout::SOURCES_DIRECTORY;
use crate::legacy::LegacyTrackingConfig;
use crate::migration::{MigrationError, MigrationRegistry, VERSION_KEY};
use crate::tracking::{TrackingConfig, CURRENT_FORMAT_VERSION};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur in tracking store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),
}

/// A tracking file as found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingConfigFile {
    Legacy(LegacyTrackingConfig),
    Current(TrackingConfig),
}

enum Format {
    Legacy,
    Current,
}

impl Format {
    /// The version marker is the discriminant: legacy files never wrote it.
    fn of(content: &str) -> Self {
        if content.contains(&format!("\"{VERSION_KEY}\"")) {
            Format::Current
        } else {
            Format::Legacy
        }
    }
}

impl TrackingConfigFile {
    /// Decode file content.
    ///
    /// Current-format content is migrated to [`CURRENT_FORMAT_VERSION`] and
    /// must parse. Legacy content goes through the recovery parser and yields
    /// `Ok(None)` when nothing recognizable is found.
    pub fn decode(content: &str) -> Result<Option<Self>, StoreError> {
        match Format::of(content) {
            Format::Current => {
                let value: serde_json::Value = serde_json::from_str(content)?;
                let value = MigrationRegistry::new().migrate_to(value, CURRENT_FORMAT_VERSION)?;
                Ok(Some(TrackingConfigFile::Current(serde_json::from_value(value)?)))
            }
            Format::Legacy => Ok(LegacyTrackingConfig::try_parse(content).map(TrackingConfigFile::Legacy)),
        }
    }

    /// Load a tracking file if it exists.
    ///
    /// Returns `Ok(None)` if the file does not exist, or if it is a legacy
    /// file with nothing recognizable in it. Unrecognizable files are left
    /// in place.
    pub fn load(path: &Path) -> Result<Option<Self>, StoreError> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let decoded = Self::decode(&content)?;
        if decoded.is_none() {
            warn!(
                path = %path.display(),
                "unrecognized tracking file content, treating as absent"
            );
        }
        Ok(decoded)
    }

    /// Current-format view, converting legacy records.
    ///
    /// Legacy data never recorded a repository type, so it is left empty.
    pub fn into_current(self, now: DateTime<Utc>) -> TrackingConfig {
        match self {
            TrackingConfigFile::Current(config) => config,
            TrackingConfigFile::Legacy(legacy) => {
                TrackingConfig::from_legacy(&legacy, SOURCES_DIRECTORY, "", now)
            }
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, TrackingConfigFile::Legacy(_))
    }
}

/// Write `value` as pretty JSON atomically (write to .tmp, then rename).
///
/// Parent directories are created as needed.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("tmp");

    {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.write_all(b"\n")?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
