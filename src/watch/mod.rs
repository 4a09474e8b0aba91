// src/watch/mod.rs

//! File watching and change matching.
//!
//! This module is responsible for:
//! - Compiling each unit's watch globs (`patterns`).
//! - Deciding which units a changed path affects (`ChangeMatcher`).
//! - Wiring up a cross-platform filesystem watcher (`notify`).
//!
//! It does **not** start builds; it only turns filesystem changes into
//! paths and paths into unit names.

pub mod patterns;
pub mod watcher;

pub use patterns::{
    affected_units, build_unit_watch_profiles, literal_dir_prefix, ChangeMatcher,
    UnitWatchProfile,
};
pub use watcher::{is_content_change, FsWatcher};
