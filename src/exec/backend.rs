// src/exec/backend.rs

//! Pluggable process runner abstraction.
//!
//! Everything that launches an external program (the installer, the build
//! tool) goes through a `ProcessRunner` instead of calling
//! `tokio::process::Command` directly. Tests swap in a fake runner that
//! records invocations and returns scripted exit codes.

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use super::command::{CommandSpec, StdioMode};

/// How a process that was successfully started came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitReport {
    /// Exit code, or `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ExitReport {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Boxed future returned by [`ProcessRunner::run`].
pub type RunFuture<'a> = Pin<Box<dyn Future<Output = io::Result<ExitReport>> + Send + 'a>>;

/// Trait abstracting how external commands are run to completion.
///
/// - `Ok(report)` means the process was started and has exited.
/// - `Err(_)` means it could not be started, or waiting on it failed at the
///   OS level.
pub trait ProcessRunner: Send + Sync {
    fn run<'a>(&'a self, spec: &'a CommandSpec) -> RunFuture<'a>;
}

/// Real runner backed by `tokio::process::Command`.
///
/// Children are never killed on drop: once spawned, a build runs to
/// completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealProcessRunner;

impl RealProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for RealProcessRunner {
    fn run<'a>(&'a self, spec: &'a CommandSpec) -> RunFuture<'a> {
        Box::pin(async move {
            let mut cmd = Command::new(&spec.program);
            cmd.args(&spec.args);

            if let Some(dir) = &spec.cwd {
                cmd.current_dir(dir);
            }

            match spec.stdio {
                StdioMode::Inherit => {
                    cmd.stdin(Stdio::inherit())
                        .stdout(Stdio::inherit())
                        .stderr(Stdio::inherit());
                }
                StdioMode::Null => {
                    cmd.stdin(Stdio::null())
                        .stdout(Stdio::null())
                        .stderr(Stdio::null());
                }
            }

            info!(cmd = %spec, cwd = ?spec.cwd, "starting process");

            let mut child = cmd.spawn()?;
            let status = child.wait().await?;
            let report = ExitReport {
                code: status.code(),
            };

            debug!(
                cmd = %spec,
                exit_code = ?report.code,
                success = report.success(),
                "process exited"
            );

            Ok(report)
        })
    }
}
