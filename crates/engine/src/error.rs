// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for workspace tracking

use pa_adapters::SourceError;
use pa_storage::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from allocating or reconciling a job's workspace
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("tracking store error: {0}")]
    Store(#[from] StoreError),
    #[error("source provider error: {0}")]
    Source(#[from] SourceError),
    #[error("{op} {path}: {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The hosted override requires a fresh work root.
    #[error("build directory counter is {0}, expected 0 for a hosted override")]
    CounterNotDefault(u64),
    #[error("build directory counter {0} cannot be advanced")]
    CounterExhausted(u64),
    #[error("tracked {kind} '{alias}' is not declared by the job")]
    ResourceMismatch { kind: &'static str, alias: String },
}
