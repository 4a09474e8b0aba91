// src/watch/patterns.rs

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use globset::{GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};

use crate::errors::Result;
use crate::path_utils::{anchor, slash_str};
use crate::unit::{BuildUnit, UnitName};

/// Compiled watch patterns for a single unit.
///
/// Patterns are anchored at the project root when compiled, so `matches`
/// expects an absolute, normalized path rendered with forward slashes.
///
/// Wildcards never match a dot-prefixed path component (`.lib.rs.swp`,
/// `.git`); such a component only matches a pattern component that itself
/// starts with a dot.
#[derive(Clone)]
pub struct UnitWatchProfile {
    name: UnitName,
    patterns: Vec<String>,
    watch_set: GlobSet,
    /// Per pattern (same index as `patterns`): its dot-prefixed components.
    dot_segments: Vec<Vec<GlobMatcher>>,
}

impl fmt::Debug for UnitWatchProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitWatchProfile")
            .field("name", &self.name)
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl UnitWatchProfile {
    /// Name of the unit this profile belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Anchored patterns, in configuration order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// True if the path matches any of the unit's patterns.
    pub fn matches(&self, abs_path: &str) -> bool {
        let hidden: Vec<&str> = abs_path.split('/').filter(|c| is_dot_component(c)).collect();
        if hidden.is_empty() {
            return self.watch_set.is_match(abs_path);
        }

        self.watch_set.matches(abs_path).into_iter().any(|idx| {
            hidden
                .iter()
                .all(|comp| self.dot_segments[idx].iter().any(|m| m.is_match(comp)))
        })
    }
}

/// Compile one profile per unit, preserving unit order.
///
/// Relative patterns are joined onto `root` and normalized, so a unit at
/// `../wasm-lib` produces patterns like `/work/wasm-lib/src/**`.
pub fn build_unit_watch_profiles(root: &Path, units: &[BuildUnit]) -> Result<Vec<UnitWatchProfile>> {
    let mut profiles = Vec::with_capacity(units.len());

    for unit in units {
        let patterns: Vec<String> = unit
            .watch_patterns()
            .iter()
            .map(|p| anchor_pattern(root, p))
            .collect();

        let watch_set = build_globset(&patterns)
            .with_context(|| format!("building watch globset for crate {}", unit.name()))?;
        let dot_segments = patterns
            .iter()
            .map(|p| dot_segment_matchers(p))
            .collect::<anyhow::Result<Vec<_>>>()
            .with_context(|| format!("building watch globset for crate {}", unit.name()))?;

        profiles.push(UnitWatchProfile {
            name: unit.name().to_string(),
            patterns,
            watch_set,
            dot_segments,
        });
    }

    Ok(profiles)
}

/// Units whose patterns match `abs_path`, in configuration order.
///
/// A unit is included iff at least one of its patterns matches.
pub fn affected_units<'a>(abs_path: &str, profiles: &'a [UnitWatchProfile]) -> Vec<&'a str> {
    profiles
        .iter()
        .filter(|p| p.matches(abs_path))
        .map(|p| p.name())
        .collect()
}

/// The change matcher: compiled profiles plus the root used to anchor both
/// patterns and relative changed paths.
#[derive(Debug, Clone)]
pub struct ChangeMatcher {
    root: PathBuf,
    profiles: Vec<UnitWatchProfile>,
}

impl ChangeMatcher {
    pub fn new(root: impl Into<PathBuf>, units: &[BuildUnit]) -> Result<Self> {
        let root = root.into();
        let profiles = build_unit_watch_profiles(&root, units)?;
        Ok(Self { root, profiles })
    }

    pub fn profiles(&self) -> &[UnitWatchProfile] {
        &self.profiles
    }

    /// Names of the units affected by a change to `changed`.
    pub fn affected_units(&self, changed: &Path) -> Vec<UnitName> {
        let abs = slash_str(&anchor(&self.root, changed));
        affected_units(&abs, &self.profiles)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

fn anchor_pattern(root: &Path, pattern: &str) -> String {
    slash_str(&anchor(root, Path::new(pattern)))
}

/// Build a GlobSet where `*` stays within one path segment and `**` crosses
/// segments.
fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = GlobBuilder::new(pat)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

fn is_dot_component(comp: &str) -> bool {
    comp.starts_with('.') && comp != "." && comp != ".."
}

/// Matchers for the pattern components that explicitly start with a dot.
fn dot_segment_matchers(pattern: &str) -> anyhow::Result<Vec<GlobMatcher>> {
    pattern
        .split('/')
        .filter(|c| is_dot_component(c))
        .map(|c| {
            let glob = GlobBuilder::new(c)
                .literal_separator(true)
                .build()
                .with_context(|| format!("invalid glob pattern: {pattern}"))?;
            Ok(glob.compile_matcher())
        })
        .collect()
}

/// The directory part of a pattern before its first glob metacharacter.
///
/// `crates/a/src/**/*.rs` → `crates/a/src`; a pattern without
/// metacharacters names a file, so its parent directory is returned.
pub fn literal_dir_prefix(pattern: &str) -> PathBuf {
    let path = Path::new(pattern);
    let mut prefix = PathBuf::new();
    let mut saw_glob = false;

    for comp in path.components() {
        let s = comp.as_os_str().to_string_lossy();
        if s.contains(['*', '?', '[', '{']) {
            saw_glob = true;
            break;
        }
        prefix.push(comp.as_os_str());
    }

    if !saw_glob {
        if let Some(parent) = prefix.parent() {
            return parent.to_path_buf();
        }
    }
    prefix
}
