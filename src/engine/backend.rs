// src/engine/backend.rs

//! Pluggable build backend abstraction.
//!
//! The runtime talks to a `BuildBackend` instead of running builds itself.
//! Production code uses [`SessionBuildBackend`], which spawns one Tokio task
//! per build and reports back with `EngineEvent::BuildFinished`. Tests can
//! provide a backend that records requests and reports scripted outcomes.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::exec::ProcessRunner;
use crate::unit::UnitName;

use super::session::Session;
use super::{BuildOutcome, EngineEvent};

/// Trait abstracting how builds requested by the core are carried out.
///
/// Implementations must eventually deliver exactly one
/// `EngineEvent::BuildFinished` per started build.
pub trait BuildBackend: Send {
    fn start_build(
        &mut self,
        unit: UnitName,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Real backend: runs `wasm-pack` through the session's builder.
pub struct SessionBuildBackend {
    session: Arc<Session>,
    runner: Arc<dyn ProcessRunner>,
    events: mpsc::Sender<EngineEvent>,
}

impl SessionBuildBackend {
    pub fn new(
        session: Arc<Session>,
        runner: Arc<dyn ProcessRunner>,
        events: mpsc::Sender<EngineEvent>,
    ) -> Self {
        Self {
            session,
            runner,
            events,
        }
    }
}

impl BuildBackend for SessionBuildBackend {
    fn start_build(
        &mut self,
        unit: UnitName,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        // Clone handles so the spawned task doesn't borrow `self`.
        let session = Arc::clone(&self.session);
        let runner = Arc::clone(&self.runner);
        let events = self.events.clone();

        Box::pin(async move {
            tokio::spawn(async move {
                let outcome = match session.unit(&unit) {
                    Some(build_unit) => match session.build_unit(runner.as_ref(), build_unit).await {
                        Ok(()) => BuildOutcome::Success,
                        Err(err) => BuildOutcome::Failed(err.to_string()),
                    },
                    None => BuildOutcome::Failed(format!("unknown crate '{unit}'")),
                };

                debug!(unit = %unit, ?outcome, "build task finished");
                if let Err(err) = events
                    .send(EngineEvent::BuildFinished { unit, outcome })
                    .await
                {
                    warn!("failed to send EngineEvent::BuildFinished: {err}");
                }
            });
            Ok(())
        })
    }
}
