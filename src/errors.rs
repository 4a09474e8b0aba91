// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrateWatchError {
    #[error("Toolchain unavailable: {0}")]
    ToolchainUnavailable(String),

    #[error("could not install {tool} with {installer} (exit code {code:?})")]
    InstallationFailed {
        tool: String,
        installer: String,
        code: Option<i32>,
    },

    #[error("Rust compilation failed for crate '{unit}': {reason}")]
    CompilationFailed { unit: String, reason: String },

    #[error("failed to spawn '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Lifecycle error: {0}")]
    Lifecycle(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, CrateWatchError>;
