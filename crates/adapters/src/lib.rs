// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: source providers, plugin host processes, disk

pub mod disk;
mod env;
pub mod plugin_host;
pub mod source;

pub use disk::{disk_usage, DiskUsage};
pub use env::plugin_host_program;
pub use plugin_host::{
    CancelMode, HostError, HostInvocation, HostKind, HostOutcome, OutputLine,
};
pub use source::{DirectorySourceProvider, SourceError, SourceProvider, SourceProviders};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use source::{FakeSourceProvider, SourceCall};
