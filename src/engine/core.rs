// src/engine/core.rs

//! Pure core state machine for change-triggered rebuilds.
//!
//! This module contains a synchronous, deterministic "core engine" that
//! consumes [`EngineEvent`]s and produces a list of [`EngineCommand`]s
//! describing what the IO shell should do next.
//!
//! The async shell (`engine::runtime::Runtime`) is responsible for:
//! - reading events from channels
//! - starting builds through a `BuildBackend`
//! - sending reload signals through a `ReloadSink`
//!
//! The core can be unit tested without any Tokio, channels, filesystem, or
//! processes.

use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::unit::UnitName;
use crate::watch::ChangeMatcher;

use super::latch::LatchTable;
use super::session::Session;
use super::{BuildOutcome, EngineEvent};

/// Command produced by the core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    /// Start a build of this unit.
    StartBuild(UnitName),
    /// Tell connected clients to reload the page.
    FullReload,
}

/// Decision returned by the core after handling a single `EngineEvent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreStep {
    pub commands: Vec<EngineCommand>,
    /// Whether the outer loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    fn with(commands: Vec<EngineCommand>) -> Self {
        Self {
            commands,
            keep_running: true,
        }
    }
}

/// Core engine state: the change matcher and one latch per unit.
#[derive(Debug)]
pub struct CoreEngine {
    matcher: ChangeMatcher,
    latches: LatchTable,
}

impl CoreEngine {
    pub fn new(matcher: ChangeMatcher) -> Self {
        Self {
            matcher,
            latches: LatchTable::new(),
        }
    }

    /// Compile the matcher for a ready session.
    pub fn for_session(session: &Session) -> Result<Self> {
        let root = session.builder().options().project_root.clone();
        let matcher = ChangeMatcher::new(root, session.units())?;
        Ok(Self::new(matcher))
    }

    pub fn matcher(&self) -> &ChangeMatcher {
        &self.matcher
    }

    pub fn latches(&self) -> &LatchTable {
        &self.latches
    }

    /// True when no build is in flight.
    pub fn is_idle(&self) -> bool {
        self.latches.all_idle()
    }

    /// Handle a single event, updating state and returning the commands for
    /// the IO shell.
    pub fn step(&mut self, event: EngineEvent) -> CoreStep {
        match event {
            EngineEvent::FileChanged { path } => {
                let affected = self.matcher.affected_units(&path);
                if affected.is_empty() {
                    debug!(path = %path.display(), "change matched no crate");
                    return CoreStep::with(Vec::new());
                }

                let mut commands = Vec::new();
                for unit in affected {
                    info!(unit = %unit, path = %path.display(), "watched file changed");
                    if self.latches.request(&unit) {
                        commands.push(EngineCommand::StartBuild(unit));
                    }
                }
                CoreStep::with(commands)
            }
            EngineEvent::BuildFinished { unit, outcome } => {
                let mut commands = Vec::new();

                match outcome {
                    BuildOutcome::Success => {
                        info!(unit = %unit, "rebuild succeeded; requesting full reload");
                        commands.push(EngineCommand::FullReload);
                    }
                    BuildOutcome::Failed(reason) => {
                        warn!(
                            unit = %unit,
                            %reason,
                            "rebuild failed; keeping previous artifact"
                        );
                    }
                }

                if self.latches.finish(&unit) {
                    info!(unit = %unit, "starting trailing rebuild for changes made during the last build");
                    commands.push(EngineCommand::StartBuild(unit));
                }

                CoreStep::with(commands)
            }
            EngineEvent::ShutdownRequested => CoreStep {
                commands: Vec::new(),
                keep_running: false,
            },
        }
    }
}
