// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pa-core: Shared types for the pipeline agent workspace and plugin core

pub mod clock;
pub mod logging_command;
pub mod output;
pub mod resources;
pub mod settings;
pub mod variables;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use logging_command::LoggingCommand;
pub use output::{OutputSink, StdoutSink, TracingSink};
pub use resources::{
    DropResource, RepositoryResource, ServiceEndpoint, LEGACY_VCS_TYPES, SELF_ALIAS,
};
pub use settings::{AgentSettings, SettingsError, SETTINGS_FILE};
pub use variables::{Variable, Variables};

#[cfg(any(test, feature = "test-support"))]
pub use output::MemorySink;
