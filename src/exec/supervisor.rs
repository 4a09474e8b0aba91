// src/exec/supervisor.rs

//! Run one external command and classify how it ended.

use std::io;

use thiserror::Error;
use tracing::debug;

use super::backend::ProcessRunner;
use super::command::CommandSpec;

/// Failure of a supervised process.
///
/// A nonzero exit and a failure to launch are kept apart: the first carries
/// the caller's own error value, the second the underlying OS error.
#[derive(Error, Debug)]
pub enum ProcessError<E> {
    /// The process ran and exited with a status other than 0.
    #[error("{0}")]
    Exited(E),

    /// The process could not be started (or waiting on it failed).
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Run `spec` to completion.
///
/// - exit code 0 → `Ok(())`
/// - any other exit (including death by signal, `code = None`) →
///   `Err(ProcessError::Exited(on_nonzero(code)))`
/// - launch failure → `Err(ProcessError::Spawn { .. })`
///
/// No retries are attempted.
pub async fn supervise<E, F>(
    runner: &dyn ProcessRunner,
    spec: &CommandSpec,
    on_nonzero: F,
) -> Result<(), ProcessError<E>>
where
    F: FnOnce(Option<i32>) -> E,
{
    match runner.run(spec).await {
        Ok(report) if report.success() => Ok(()),
        Ok(report) => {
            debug!(cmd = %spec, exit_code = ?report.code, "process exited unsuccessfully");
            Err(ProcessError::Exited(on_nonzero(report.code)))
        }
        Err(source) => Err(ProcessError::Spawn {
            program: spec.program_display(),
            source,
        }),
    }
}
