// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `##vso[artifact.upload artifactname=<name>;]<path>`
//!
//! Copies a file or directory into the job's artifact staging area, under
//! `<system.artifactsdirectory>/<artifactname>[/<containerfolder>]`.

use crate::wire::CommandPluginContext;
use crate::{CommandPlugin, PluginFailure};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub(crate) const ARTIFACTS_DIRECTORY_VARIABLE: &str = "system.artifactsdirectory";

#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactUploadCommand;

impl CommandPlugin for ArtifactUploadCommand {
    fn area(&self) -> &'static str {
        "artifact"
    }

    fn event(&self) -> &'static str {
        "upload"
    }

    fn display_name(&self) -> &'static str {
        "Upload artifact"
    }

    fn run(&self, ctx: &CommandPluginContext, out: &mut dyn Write) -> Result<(), PluginFailure> {
        let name = ctx
            .property("artifactname")
            .ok_or_else(|| PluginFailure::MissingInput("artifactname".to_string()))?;
        if ctx.data.trim().is_empty() {
            return Err(PluginFailure::MissingInput("data".to_string()));
        }
        let root = ctx
            .variable(ARTIFACTS_DIRECTORY_VARIABLE)
            .ok_or_else(|| PluginFailure::MissingVariable(ARTIFACTS_DIRECTORY_VARIABLE.to_string()))?;

        let mut destination = Path::new(root).join(name);
        if let Some(folder) = ctx.property("containerfolder") {
            destination.push(folder);
        }
        let source = PathBuf::from(ctx.data.trim());
        let copied = if source.is_dir() {
            if resolved(&destination).starts_with(resolved(&source)) {
                return Err(PluginFailure::DestinationInsideSource {
                    from: source.display().to_string(),
                    to: destination.display().to_string(),
                });
            }
            copy_tree(&source, &destination)?
        } else {
            let file_name = source
                .file_name()
                .ok_or_else(|| io_failure("read", &source, std::io::ErrorKind::InvalidInput.into()))?;
            create_dir(&destination)?;
            copy_file(&source, &destination.join(file_name))?;
            1
        };

        writeln!(
            out,
            "Uploaded {copied} file(s) to artifact '{name}' at {}",
            destination.display()
        )
        .map_err(|e| io_failure("write", Path::new("stdout"), e))
    }
}

/// Absolute form of `path`, following symlinks when it exists.
fn resolved(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn copy_tree(from: &Path, to: &Path) -> Result<usize, PluginFailure> {
    create_dir(to)?;
    let entries = fs::read_dir(from).map_err(|e| io_failure("read", from, e))?;
    let mut copied = 0;
    for entry in entries {
        let entry = entry.map_err(|e| io_failure("read", from, e))?;
        let path = entry.path();
        let target = to.join(entry.file_name());
        if path.is_dir() {
            copied += copy_tree(&path, &target)?;
        } else {
            copy_file(&path, &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn create_dir(path: &Path) -> Result<(), PluginFailure> {
    fs::create_dir_all(path).map_err(|e| io_failure("create", path, e))
}

fn copy_file(from: &Path, to: &Path) -> Result<(), PluginFailure> {
    fs::copy(from, to)
        .map(|_| ())
        .map_err(|e| io_failure("copy", from, e))
}

fn io_failure(op: &'static str, path: &Path, source: std::io::Error) -> PluginFailure {
    PluginFailure::Io {
        op,
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
