// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job log output sinks.
//!
//! Every line handed to a sink has already been through secret masking
//! upstream; sinks write what they are given.

/// Destination for job log lines.
pub trait OutputSink: Send + Sync {
    fn write_line(&self, line: &str);

    fn warning(&self, message: &str) {
        self.write_line(&format!("##[warning]{message}"));
    }

    fn error(&self, message: &str) {
        self.write_line(&format!("##[error]{message}"));
    }
}

/// Sink that forwards job output to the agent's diagnostic log.
#[derive(Debug, Clone, Default)]
pub struct TracingSink;

impl OutputSink for TracingSink {
    fn write_line(&self, line: &str) {
        tracing::info!(target: "job_output", "{}", line);
    }
}

/// Sink that writes job output to the process's stdout.
#[derive(Debug, Clone, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&self, line: &str) {
        println!("{line}");
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use memory::MemorySink;

#[cfg(any(test, feature = "test-support"))]
mod memory {
    use super::OutputSink;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// In-memory sink for tests
    #[derive(Debug, Clone, Default)]
    pub struct MemorySink {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl MemorySink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn lines(&self) -> Vec<String> {
            self.lines.lock().clone()
        }

        pub fn contains(&self, needle: &str) -> bool {
            self.lines.lock().iter().any(|l| l.contains(needle))
        }
    }

    impl OutputSink for MemorySink {
        fn write_line(&self, line: &str) {
            self.lines.lock().push(line.to_string());
        }
    }
}
