// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Tracking config store: persisted workspace mappings under the work root

mod file;
pub mod layout;
mod legacy;
mod migration;
mod top_level;
mod tracking;

pub use file::{StoreError, TrackingConfigFile};
pub use legacy::LegacyTrackingConfig;
pub use migration::{Migration, MigrationError, MigrationRegistry};
pub use top_level::{corrupted_path, TopLevelLoad, TopLevelTrackingConfig};
pub use tracking::{
    DropTrackingConfig, RepositoryTrackingConfig, Resources, TrackingConfig,
    CURRENT_FORMAT_VERSION,
};
