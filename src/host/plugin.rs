// src/host/plugin.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::build::{BuildOptions, UnitBuilder};
use crate::config::ConfigFile;
use crate::engine::{initialize, CoreEngine, EngineEvent, InitReport, Session};
use crate::errors::{CrateWatchError, Result};
use crate::exec::ProcessRunner;
use crate::path_utils::anchor;
use crate::toolchain::{ExecutableLookup, ToolchainLocator, ToolchainSpec};
use crate::types::RunMode;
use crate::unit::BuildUnit;
use crate::watch::literal_dir_prefix;

/// Where the plugin is in the host lifecycle.
#[derive(Debug, Clone, Default)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Initializing,
    Ready(Arc<Session>),
}

/// Host-facing hooks.
///
/// A host calls them in this order: [`config`](Self::config) while building
/// its config, [`config_resolved`](Self::config_resolved) once the run mode
/// is known, [`configure_server`](Self::configure_server) when its dev server
/// exists, then [`handle_hot_update`](Self::handle_hot_update) for every
/// changed file.
#[derive(Debug)]
pub struct CratePlugin {
    units: Vec<BuildUnit>,
    toolchain: ToolchainSpec,
    build: BuildOptions,
    state: LifecycleState,
}

impl CratePlugin {
    pub fn new(units: Vec<BuildUnit>, toolchain: ToolchainSpec, build: BuildOptions) -> Self {
        Self {
            units,
            toolchain,
            build,
            state: LifecycleState::Uninitialized,
        }
    }

    /// Build the plugin from a validated config; relative paths resolve
    /// against `project_root`.
    pub fn from_config(cfg: &ConfigFile, project_root: impl Into<PathBuf>) -> Self {
        Self::new(
            cfg.units(),
            ToolchainSpec::from(cfg.toolchain()),
            BuildOptions::from_section(project_root, cfg.build()),
        )
    }

    pub fn units(&self) -> &[BuildUnit] {
        &self.units
    }

    pub fn build_options(&self) -> &BuildOptions {
        &self.build
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    /// The session, once `config_resolved` has completed.
    pub fn session(&self) -> Option<Arc<Session>> {
        match &self.state {
            LifecycleState::Ready(session) => Some(Arc::clone(session)),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, LifecycleState::Ready(_))
    }

    /// `config` hook: static changes the host must apply before any build.
    pub fn config(&self) -> super::ConfigPatch {
        super::ConfigPatch::for_units(self.units.iter().map(|u| u.name()))
    }

    /// `configResolved` hook: fix the profile, locate the toolchain and build
    /// every unit once.
    ///
    /// Toolchain failures are returned (and leave the plugin uninitialized);
    /// individual build failures are only reported.
    pub async fn config_resolved(
        &mut self,
        mode: RunMode,
        lookup: &dyn ExecutableLookup,
        runner: &dyn ProcessRunner,
    ) -> Result<InitReport> {
        if !matches!(self.state, LifecycleState::Uninitialized) {
            return Err(CrateWatchError::Lifecycle(
                "config_resolved called more than once".to_string(),
            ));
        }
        self.state = LifecycleState::Initializing;

        let locator = ToolchainLocator::new(&self.toolchain, lookup, runner);
        let builder = UnitBuilder::new(self.build.clone());

        match initialize(mode, self.units.clone(), builder, &locator, runner).await {
            Ok((session, report)) => {
                self.state = LifecycleState::Ready(Arc::new(session));
                Ok(report)
            }
            Err(err) => {
                self.state = LifecycleState::Uninitialized;
                Err(err)
            }
        }
    }

    /// Directories the host watcher must observe: every unit's source
    /// directory, plus the literal prefix of any watch pattern that points
    /// outside them.
    pub fn watch_roots(&self) -> Vec<PathBuf> {
        let root = &self.build.project_root;
        let mut roots: Vec<PathBuf> = Vec::new();

        for unit in &self.units {
            push_root(&mut roots, anchor(root, unit.source_path()));
        }
        for unit in &self.units {
            for pattern in unit.watch_patterns() {
                push_root(&mut roots, anchor(root, &literal_dir_prefix(pattern)));
            }
        }

        roots
    }

    /// `configureServer` hook: register extra watch roots.
    ///
    /// Only valid once `config_resolved` has completed. A root that cannot
    /// be watched (e.g. it does not exist yet) is logged and skipped.
    pub fn configure_server(&self, watcher: &mut dyn super::WatchRoots) -> Result<()> {
        if !self.is_ready() {
            return Err(CrateWatchError::Lifecycle(
                "configure_server called before config_resolved completed".to_string(),
            ));
        }

        for root in self.watch_roots() {
            if let Err(err) = watcher.add_root(&root) {
                warn!(root = %root.display(), error = %err, "could not watch directory");
            }
        }
        Ok(())
    }

    /// Compile the change matcher for the ready session.
    pub fn engine(&self) -> Result<CoreEngine> {
        match &self.state {
            LifecycleState::Ready(session) => CoreEngine::for_session(session),
            _ => Err(CrateWatchError::Lifecycle(
                "engine requested before config_resolved completed".to_string(),
            )),
        }
    }

    /// `handleHotUpdate` hook: forward a changed file to the engine.
    ///
    /// Changes that arrive before the session is ready are dropped.
    pub async fn handle_hot_update(
        &self,
        file: &Path,
        events: &mpsc::Sender<EngineEvent>,
    ) -> Result<()> {
        if !self.is_ready() {
            debug!(path = %file.display(), "change before session is ready; ignoring");
            return Ok(());
        }

        events
            .send(EngineEvent::FileChanged {
                path: file.to_path_buf(),
            })
            .await
            .map_err(|e| anyhow::anyhow!("engine event channel closed: {e}"))?;
        Ok(())
    }
}

fn push_root(roots: &mut Vec<PathBuf>, candidate: PathBuf) {
    if roots.iter().any(|r| candidate.starts_with(r)) {
        return;
    }
    debug!(root = %candidate.display(), "adding watch root");
    roots.retain(|r| !r.starts_with(&candidate));
    roots.push(candidate);
}
