// src/watch/watcher.rs

use std::path::{Path, PathBuf};

use anyhow::Context;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::Result;
use crate::host::WatchRoots;

/// Filesystem watcher acting as the host's watcher.
///
/// Raw change events are forwarded as paths on an unbounded channel; nothing
/// here knows about units or patterns. Dropping the handle stops watching.
pub struct FsWatcher {
    inner: RecommendedWatcher,
    roots: Vec<PathBuf>,
}

impl std::fmt::Debug for FsWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsWatcher")
            .field("roots", &self.roots)
            .finish_non_exhaustive()
    }
}

impl FsWatcher {
    /// Create a watcher with no roots yet. Every changed path is sent on
    /// `changes`.
    pub fn new(changes: mpsc::UnboundedSender<PathBuf>) -> Result<Self> {
        // Closure called synchronously by notify whenever an event arrives.
        let inner = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !is_content_change(&event.kind) {
                        return;
                    }
                    for path in event.paths {
                        if let Err(err) = changes.send(path) {
                            // The receiver is gone; tracing may already be torn down.
                            eprintln!("cratewatch: failed to forward notify event: {err}");
                        }
                    }
                }
                Err(err) => {
                    eprintln!("cratewatch: file watch error: {err}");
                }
            },
            Config::default(),
        )
        .context("creating filesystem watcher")?;

        Ok(Self {
            inner,
            roots: Vec::new(),
        })
    }

    /// Roots added so far.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl WatchRoots for FsWatcher {
    fn add_root(&mut self, root: &Path) -> Result<()> {
        if self.roots.iter().any(|r| root.starts_with(r)) {
            debug!(root = %root.display(), "already covered by an existing watch root");
            return Ok(());
        }

        self.inner
            .watch(root, RecursiveMode::Recursive)
            .with_context(|| format!("watching {}", root.display()))?;
        self.roots.push(root.to_path_buf());

        info!("file watcher started on {:?}", root);
        Ok(())
    }
}

/// Only creations, modifications and removals count as changes. Access
/// events (the build tool reading sources) would otherwise retrigger builds.
pub fn is_content_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}
