// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Pipeline agent engine: workspace tracking, garbage collection, plugins

mod context;
mod error;
pub mod gc;
mod maintenance;
pub mod plugins;
mod reconcile;
mod tracking;
pub mod vars;

#[cfg(test)]
mod test_helpers;

pub use context::ExecutionContext;
pub use error::TrackingError;
pub use gc::{DisposeSummary, GarbageCollector, GcError, MarkSummary};
pub use maintenance::{run_maintenance, MaintenanceOptions, MaintenanceSummary};
pub use plugins::{
    AgentPluginInfo, CommandPluginInfo, PluginError, PluginRegistry, PluginRunner,
    RegistryError, TaskPluginInfo,
};
pub use reconcile::reconcile;
pub use tracking::{hash_key, TrackingManager};
