// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Disk usage of the volume holding the work root

use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskUsage {
    pub available: u64,
    pub total: u64,
}

impl DiskUsage {
    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.available)
    }
}

impl fmt::Display for DiskUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MB: u64 = 1024 * 1024;
        write!(
            f,
            "{} MB used, {} MB available, {} MB total",
            self.used() / MB,
            self.available / MB,
            self.total / MB
        )
    }
}

pub fn disk_usage(path: &Path) -> std::io::Result<DiskUsage> {
    Ok(DiskUsage {
        available: fs2::available_space(path)?,
        total: fs2::total_space(path)?,
    })
}

#[cfg(test)]
#[path = "disk_tests.rs"]
mod tests;
