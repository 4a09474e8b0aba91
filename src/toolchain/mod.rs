// src/toolchain/mod.rs

//! Locating (and if needed installing) the external build tool.

pub mod locator;
pub mod lookup;

use std::path::{Path, PathBuf};

use crate::config::ToolchainSection;

pub use locator::ToolchainLocator;
pub use lookup::{ExecutableLookup, PathLookup};

/// Names of the build tool and of the package manager that installs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainSpec {
    pub tool: String,
    pub installer: String,
}

impl Default for ToolchainSpec {
    fn default() -> Self {
        Self::from(&ToolchainSection::default())
    }
}

impl From<&ToolchainSection> for ToolchainSpec {
    fn from(section: &ToolchainSection) -> Self {
        Self {
            tool: section.tool.clone(),
            installer: section.installer.clone(),
        }
    }
}

/// Resolved path to the build executable.
///
/// Resolved once per session and never re-resolved, even if the file later
/// disappears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainHandle(PathBuf);

impl ToolchainHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
