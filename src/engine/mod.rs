// src/engine/mod.rs

//! Reconciliation engine for cratewatch.
//!
//! This module ties together:
//! - session initialization (profile, toolchain, initial builds)
//! - per-unit build latches (one build per unit, bursts coalesced)
//! - the runtime event loop that reacts to:
//!   - file changes
//!   - build completions
//!   - shutdown signals
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use std::path::PathBuf;

use crate::unit::UnitName;

/// Result of one build attempt, consumed immediately by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Success,
    Failed(String),
}

/// Events flowing into the runtime from the host, builds, and signals.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// The host reported a changed file.
    FileChanged { path: PathBuf },
    /// A build process for `unit` ended.
    BuildFinished { unit: UnitName, outcome: BuildOutcome },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod backend;
pub mod core;
pub mod init;
pub mod latch;
pub mod runtime;
pub mod session;

pub use backend::{BuildBackend, SessionBuildBackend};
pub use self::core::{CoreEngine, CoreStep, EngineCommand};
pub use init::{initial_builds, initialize, InitReport, UnitBuildResult};
pub use latch::{LatchTable, UnitLatch};
pub use runtime::Runtime;
pub use session::Session;
