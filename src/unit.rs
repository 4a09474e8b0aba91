// src/unit.rs

//! Build units: one Rust crate compiled to one web artifact.

use std::path::{Path, PathBuf};

use crate::path_utils::slash_str;

/// Canonical unit name type used throughout the engine.
pub type UnitName = String;

/// File name of a unit's manifest, watched by default.
pub const MANIFEST_FILE: &str = "Cargo.toml";

/// One foreign-language build target.
///
/// Watch patterns are resolved when the unit is constructed and never change
/// afterwards, so every unit reaching the change matcher has a full watch set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildUnit {
    name: UnitName,
    source_path: PathBuf,
    watch_patterns: Vec<String>,
}

impl BuildUnit {
    /// Construct a unit, defaulting `watch` to [`default_watch_patterns`]
    /// when it is `None`.
    pub fn new(
        name: impl Into<UnitName>,
        source_path: impl Into<PathBuf>,
        watch: Option<Vec<String>>,
    ) -> Self {
        let source_path = source_path.into();
        let watch_patterns = watch.unwrap_or_else(|| default_watch_patterns(&source_path));
        Self {
            name: name.into(),
            source_path,
            watch_patterns,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory holding the unit's sources, as configured (usually relative
    /// to the project root).
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn watch_patterns(&self) -> &[String] {
        &self.watch_patterns
    }
}

/// Default watch set: everything under `<path>/src` plus the manifest.
pub fn default_watch_patterns(source_path: &Path) -> Vec<String> {
    let base = slash_str(source_path);
    vec![format!("{base}/src/**"), format!("{base}/{MANIFEST_FILE}")]
}
