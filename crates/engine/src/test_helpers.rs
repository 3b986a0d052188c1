// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine crate.

use crate::context::ExecutionContext;
use crate::tracking::TrackingManager;
use crate::vars;
use pa_core::{AgentSettings, FakeClock, MemorySink, RepositoryResource};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub(crate) const COLLECTION: &str = "c0ffee00-0000-0000-0000-000000000001";
pub(crate) const DEFINITION: &str = "42";

/// A temporary work root with a fake clock and a tracking manager over it.
pub(crate) struct TestWork {
    pub dir: TempDir,
    pub clock: FakeClock,
    pub manager: TrackingManager<FakeClock>,
}

impl TestWork {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let clock = FakeClock::new();
        let manager = TrackingManager::new(dir.path(), clock.clone());
        Self { dir, clock, manager }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Tracking file of the test definition.
    pub fn file(&self) -> PathBuf {
        self.manager.tracking_file("hash")
    }
}

/// Context for the test definition with the given repositories.
pub(crate) fn job(repositories: Vec<RepositoryResource>) -> ExecutionContext {
    let mut ctx = ExecutionContext::new(AgentSettings {
        agent_id: 7,
        agent_name: "agent-7".to_string(),
        ..AgentSettings::default()
    });
    ctx.variables.set(vars::COLLECTION_ID, COLLECTION);
    ctx.variables.set(vars::DEFINITION_ID, DEFINITION);
    ctx.variables.set(vars::DEFINITION_NAME, "ci");
    ctx.repositories = repositories;
    ctx
}

/// Context whose job output is captured.
pub(crate) fn job_with_output(
    repositories: Vec<RepositoryResource>,
) -> (ExecutionContext, MemorySink) {
    let sink = MemorySink::new();
    let ctx = job(repositories).with_output(Arc::new(sink.clone()));
    (ctx, sink)
}
