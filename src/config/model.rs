// src/config/model.rs

use serde::Deserialize;

use crate::unit::BuildUnit;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [toolchain]
/// tool = "wasm-pack"
/// installer = "npm"
///
/// [build]
/// out_root = "node_modules"
/// target = "web"
///
/// [[crate]]
/// name = "my-crate"
/// path = "my-crate"
/// watch = ["my-crate/src/**"]
/// ```
///
/// `[toolchain]` and `[build]` are optional. Crates are kept in declaration
/// order; that order drives the initial builds.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub toolchain: ToolchainSection,

    #[serde(default)]
    pub build: BuildSection,

    /// All crates from `[[crate]]`.
    #[serde(default, rename = "crate")]
    pub crates: Vec<CrateConfig>,
}

/// Validated configuration.
///
/// Only constructed through `TryFrom<RawConfigFile>` (see `validate.rs`).
#[derive(Debug, Clone)]
pub struct ConfigFile {
    toolchain: ToolchainSection,
    build: BuildSection,
    crates: Vec<CrateConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        toolchain: ToolchainSection,
        build: BuildSection,
        crates: Vec<CrateConfig>,
    ) -> Self {
        Self {
            toolchain,
            build,
            crates,
        }
    }

    pub fn toolchain(&self) -> &ToolchainSection {
        &self.toolchain
    }

    pub fn build(&self) -> &BuildSection {
        &self.build
    }

    pub fn crates(&self) -> &[CrateConfig] {
        &self.crates
    }

    /// Build units in declaration order, with default watch patterns applied.
    pub fn units(&self) -> Vec<BuildUnit> {
        self.crates
            .iter()
            .map(|c| BuildUnit::new(c.name.clone(), c.path.clone(), c.watch.clone()))
            .collect()
    }
}

/// `[toolchain]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolchainSection {
    /// Build executable looked up on `PATH`.
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Package manager used to install `tool` when it is missing.
    #[serde(default = "default_installer")]
    pub installer: String,
}

fn default_tool() -> String {
    "wasm-pack".to_string()
}

fn default_installer() -> String {
    "npm".to_string()
}

impl Default for ToolchainSection {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            installer: default_installer(),
        }
    }
}

/// `[build]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildSection {
    /// Dependency-cache root, relative to the project root. Each crate's
    /// artifact lands in `<out_root>/<name>`.
    #[serde(default = "default_out_root")]
    pub out_root: String,

    /// Value passed to `--target`.
    #[serde(default = "default_target")]
    pub target: String,

    /// Extra arguments appended after the fixed build arguments.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_out_root() -> String {
    "node_modules".to_string()
}

fn default_target() -> String {
    "web".to_string()
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            out_root: default_out_root(),
            target: default_target(),
            extra_args: Vec::new(),
        }
    }
}

/// `[[crate]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CrateConfig {
    /// Unique name; also the output package name.
    pub name: String,

    /// Crate directory, relative to the project root.
    pub path: String,

    /// Optional explicit watch patterns.
    ///
    /// If `None`, the crate watches `<path>/src/**` and `<path>/Cargo.toml`.
    #[serde(default)]
    pub watch: Option<Vec<String>>,
}
