// src/engine/latch.rs

use std::collections::HashMap;

use tracing::debug;

use crate::unit::UnitName;

/// Build state of a single unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitLatch {
    #[default]
    Idle,
    /// A build process is running. `pending` records that at least one more
    /// change arrived meanwhile and a trailing rebuild is owed.
    Building { pending: bool },
}

/// Per-unit latches that keep at most one build per unit in flight.
///
/// Semantics:
/// - A request for an `Idle` unit starts a build immediately.
/// - Requests for a `Building` unit are coalesced into one trailing rebuild,
///   however many arrive before the running build finishes.
/// - When a build finishes, the owed rebuild (if any) starts right away;
///   otherwise the unit goes back to `Idle`.
#[derive(Debug, Default)]
pub struct LatchTable {
    latches: HashMap<UnitName, UnitLatch>,
}

impl LatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `unit` (`Idle` if never seen).
    pub fn state(&self, unit: &str) -> UnitLatch {
        self.latches.get(unit).copied().unwrap_or_default()
    }

    /// True when no unit is building.
    pub fn all_idle(&self) -> bool {
        self.latches.values().all(|l| *l == UnitLatch::Idle)
    }

    /// Record a build request. Returns true if the caller should start a
    /// build now.
    pub fn request(&mut self, unit: &str) -> bool {
        let latch = self.latches.entry(unit.to_string()).or_default();
        match latch {
            UnitLatch::Idle => {
                *latch = UnitLatch::Building { pending: false };
                true
            }
            UnitLatch::Building { pending } => {
                if !*pending {
                    debug!(unit, "build in flight; queueing one trailing rebuild");
                }
                *pending = true;
                false
            }
        }
    }

    /// Record that the running build of `unit` finished. Returns true if a
    /// trailing rebuild should start now (the unit stays `Building`).
    pub fn finish(&mut self, unit: &str) -> bool {
        let latch = self.latches.entry(unit.to_string()).or_default();
        match *latch {
            UnitLatch::Building { pending: true } => {
                *latch = UnitLatch::Building { pending: false };
                true
            }
            UnitLatch::Building { pending: false } => {
                *latch = UnitLatch::Idle;
                false
            }
            UnitLatch::Idle => {
                debug!(unit, "build finished for a unit that was not building");
                false
            }
        }
    }
}
