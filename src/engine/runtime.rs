// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::host::ReloadSink;

use super::backend::BuildBackend;
use super::core::{CoreEngine, EngineCommand};
use super::EngineEvent;

/// Drives the core engine in response to `EngineEvent`s, delegating builds to
/// a `BuildBackend` and reload signals to a `ReloadSink`.
///
/// This is a pure IO shell around `CoreEngine`, which contains all the
/// rebuild semantics.
pub struct Runtime<B: BuildBackend, R: ReloadSink> {
    core: CoreEngine,
    event_rx: mpsc::Receiver<EngineEvent>,
    backend: B,
    reload: R,
}

impl<B: BuildBackend, R: ReloadSink> fmt::Debug for Runtime<B, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<B: BuildBackend, R: ReloadSink> Runtime<B, R> {
    pub fn new(
        core: CoreEngine,
        event_rx: mpsc::Receiver<EngineEvent>,
        backend: B,
        reload: R,
    ) -> Self {
        Self {
            core,
            event_rx,
            backend,
            reload,
        }
    }

    /// Main event loop.
    ///
    /// Runs until `ShutdownRequested` arrives or every sender is dropped.
    /// Returns the core so callers (and tests) can inspect its final state.
    pub async fn run(mut self) -> Result<CoreEngine> {
        info!("cratewatch runtime started");

        while let Some(event) = self.event_rx.recv().await {
            debug!(?event, "runtime received event");

            let step = self.core.step(event);
            for command in step.commands {
                self.execute_command(command).await?;
            }

            if !step.keep_running {
                info!("shutdown requested; stopping runtime");
                break;
            }
        }

        info!("runtime exiting");
        Ok(self.core)
    }

    async fn execute_command(&mut self, command: EngineCommand) -> Result<()> {
        match command {
            EngineCommand::StartBuild(unit) => {
                debug!(unit = %unit, "dispatching build");
                self.backend.start_build(unit).await?;
            }
            EngineCommand::FullReload => {
                // A broken reload channel must not end the watch session.
                if let Err(err) = self.reload.full_reload() {
                    warn!(error = %err, "failed to send full-reload signal");
                }
            }
        }
        Ok(())
    }
}
