// src/config/mod.rs

//! Configuration loading and validation for cratewatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate crate entries and sections (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, parse_str};
pub use model::{BuildSection, ConfigFile, CrateConfig, RawConfigFile, ToolchainSection};
