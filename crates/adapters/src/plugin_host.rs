// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plugin host process execution
//!
//! The host is launched as `<program> task|command "<entry point>, <module>"`.
//! It receives one JSON line on stdin, after which stdin is closed, and
//! reports progress on stdout and stderr.

use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Errors from launching or talking to a plugin host
#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to start `{command_line}`: {source}")]
    Spawn {
        command_line: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O with `{command_line}` failed: {source}")]
    Io {
        command_line: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    Task,
    Command,
}

impl HostKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostKind::Task => "task",
            HostKind::Command => "command",
        }
    }
}

impl fmt::Display for HostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do to the host process when the job is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelMode {
    /// Send an interrupt and let the host wind down.
    Interrupt,
    Kill,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostOutcome {
    /// `-1` when the process was terminated by a signal.
    pub exit_code: i32,
    pub cancelled: bool,
}

impl HostOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// One plugin host launch.
#[derive(Debug, Clone)]
pub struct HostInvocation {
    pub program: PathBuf,
    pub kind: HostKind,
    /// `"<entry point>, <module>"`
    pub target: String,
    pub working_directory: Option<PathBuf>,
}

impl HostInvocation {
    pub fn new(program: impl Into<PathBuf>, kind: HostKind, entry_point: &str, module: &str) -> Self {
        Self {
            program: program.into(),
            kind,
            target: format!("{entry_point}, {module}"),
            working_directory: None,
        }
    }

    pub fn working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    pub fn command_line(&self) -> String {
        format!("{} {} \"{}\"", self.program.display(), self.kind, self.target)
    }

    /// Launch the host, hand it `input`, and stream its output to `on_line`
    /// until it exits.
    ///
    /// Lines are delivered in arrival order per stream. When `cancel` fires the
    /// process is interrupted or killed according to `on_cancel`, and its
    /// remaining output is still drained.
    pub async fn run<F>(
        &self,
        input: &str,
        cancel: &CancellationToken,
        on_cancel: CancelMode,
        mut on_line: F,
    ) -> Result<HostOutcome, HostError>
    where
        F: FnMut(OutputLine),
    {
        let command_line = self.command_line();
        let span = tracing::info_span!("plugin_host.run", kind = %self.kind, target = %self.target);
        async {
            tracing::info!(command = %command_line, "starting");
            let start = std::time::Instant::now();
            let io_err = |source: std::io::Error| HostError::Io {
                command_line: command_line.clone(),
                source,
            };

            let mut cmd = Command::new(&self.program);
            cmd.arg(self.kind.as_str())
                .arg(&self.target)
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .env_remove("RUST_LOG")
                .kill_on_drop(true);
            if let Some(dir) = &self.working_directory {
                cmd.current_dir(dir);
            }
            let mut child = cmd.spawn().map_err(|source| HostError::Spawn {
                command_line: command_line.clone(),
                source,
            })?;

            if let Some(mut stdin) = child.stdin.take() {
                let written = async {
                    stdin.write_all(input.as_bytes()).await?;
                    stdin.write_all(b"\n").await?;
                    stdin.shutdown().await
                }
                .await;
                match written {
                    Ok(()) => {}
                    // The host may exit without reading its input.
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                        tracing::warn!("plugin host closed stdin before reading input");
                    }
                    Err(e) => return Err(io_err(e)),
                }
            }

            let mut stdout = child.stdout.take().map(|s| BufReader::new(s).lines());
            let mut stderr = child.stderr.take().map(|s| BufReader::new(s).lines());
            let mut cancelled = false;

            loop {
                tokio::select! {
                    line = next_line(&mut stdout), if stdout.is_some() => match line.map_err(io_err)? {
                        Some(line) => on_line(OutputLine::Stdout(line)),
                        None => stdout = None,
                    },
                    line = next_line(&mut stderr), if stderr.is_some() => match line.map_err(io_err)? {
                        Some(line) => on_line(OutputLine::Stderr(line)),
                        None => stderr = None,
                    },
                    _ = cancel.cancelled(), if !cancelled => {
                        cancelled = true;
                        tracing::info!(mode = ?on_cancel, "cancelling plugin host");
                        signal(&mut child, on_cancel);
                    }
                    else => break,
                }
                if stdout.is_none() && stderr.is_none() {
                    break;
                }
            }

            let status = child.wait().await.map_err(io_err)?;
            let outcome = HostOutcome {
                exit_code: status.code().unwrap_or(-1),
                cancelled,
            };
            let elapsed_ms = start.elapsed().as_millis() as u64;
            if outcome.success() {
                tracing::info!(elapsed_ms, "plugin host exited");
            } else {
                tracing::warn!(elapsed_ms, exit_code = outcome.exit_code, cancelled, "plugin host failed");
            }
            Ok(outcome)
        }
        .instrument(span)
        .await
    }
}

async fn next_line<R>(
    lines: &mut Option<tokio::io::Lines<BufReader<R>>>,
) -> std::io::Result<Option<String>>
where
    R: tokio::io::AsyncRead + Unpin,
{
    match lines {
        Some(lines) => lines.next_line().await,
        None => Ok(None),
    }
}

fn signal(child: &mut Child, mode: CancelMode) {
    match mode {
        CancelMode::Interrupt => interrupt(child),
        CancelMode::Kill => {
            if let Err(e) = child.start_kill() {
                tracing::warn!(error = %e, "kill failed (may be expected)");
            }
        }
    }
}

#[cfg(unix)]
fn interrupt(child: &mut Child) {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let Some(pid) = child.id() else {
        return;
    };
    if let Err(e) = kill(Pid::from_raw(pid as i32), Signal::SIGINT) {
        tracing::warn!(pid, error = %e, "interrupt failed (may be expected)");
    }
}

#[cfg(not(unix))]
fn interrupt(child: &mut Child) {
    if let Err(e) = child.start_kill() {
        tracing::warn!(error = %e, "kill failed (may be expected)");
    }
}

#[cfg(all(test, unix))]
#[path = "plugin_host_tests.rs"]
mod tests;
