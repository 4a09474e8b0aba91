// src/host/mod.rs

//! The surface a dev-server host drives cratewatch through.
//!
//! The host owns its config, its watcher and its client connections; the
//! core only ever returns a [`ConfigPatch`] for the host to apply, asks a
//! [`WatchRoots`] to observe more directories, and signals reloads through a
//! [`ReloadSink`].

use std::path::Path;

use serde::Serialize;

use crate::errors::Result;

pub mod plugin;
pub mod stdout;

pub use plugin::{CratePlugin, LifecycleState};
pub use stdout::StdoutReloadSink;

/// Channel through which a full-reload broadcast reaches connected clients.
pub trait ReloadSink: Send {
    fn full_reload(&mut self) -> Result<()>;
}

/// A watcher that can be told to observe extra directories.
pub trait WatchRoots {
    fn add_root(&mut self, root: &Path) -> Result<()>;
}

/// Declarative config delta returned by the `config` hook.
///
/// Serialises to the shape a bundler config expects:
/// `{"optimizeDeps":{"exclude":[..]},"server":{"watch":{"disableGlobbing":false}}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    pub optimize_deps: OptimizeDepsPatch,
    pub server: ServerPatch,
}

/// Names appended to the host's dependency-optimizer exclusion list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizeDepsPatch {
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerPatch {
    pub watch: WatchPatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchPatch {
    pub disable_globbing: bool,
}

impl ConfigPatch {
    /// Exclude `names` from pre-bundling and keep watcher globbing enabled.
    pub fn for_units<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            optimize_deps: OptimizeDepsPatch {
                exclude: names.into_iter().map(Into::into).collect(),
            },
            server: ServerPatch {
                watch: WatchPatch {
                    disable_globbing: false,
                },
            },
        }
    }

    /// Apply onto an existing exclusion list, keeping what the host already
    /// had and skipping duplicates.
    pub fn merge_exclusions(&self, existing: &[String]) -> Vec<String> {
        let mut merged = existing.to_vec();
        for name in &self.optimize_deps.exclude {
            if !merged.contains(name) {
                merged.push(name.clone());
            }
        }
        merged
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| anyhow::Error::from(e).into())
    }
}
