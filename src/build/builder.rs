// src/build/builder.rs

use std::path::PathBuf;

use tracing::info;

use crate::config::BuildSection;
use crate::errors::{CrateWatchError, Result};
use crate::exec::{supervise, CommandSpec, ProcessError, ProcessRunner, StdioMode};
use crate::path_utils::{anchor, relative_to};
use crate::toolchain::ToolchainHandle;
use crate::types::BuildProfile;
use crate::unit::BuildUnit;

/// Options shared by every unit build in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Directory all configured paths are relative to.
    pub project_root: PathBuf,
    /// Dependency-cache root (relative to `project_root` unless absolute).
    pub out_root: PathBuf,
    /// `--target` value.
    pub target: String,
    /// Appended after the fixed argument template.
    pub extra_args: Vec<String>,
}

impl BuildOptions {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self::from_section(project_root, &BuildSection::default())
    }

    pub fn from_section(project_root: impl Into<PathBuf>, section: &BuildSection) -> Self {
        Self {
            project_root: project_root.into(),
            out_root: PathBuf::from(&section.out_root),
            target: section.target.clone(),
            extra_args: section.extra_args.clone(),
        }
    }
}

/// Drives one `wasm-pack build` per unit.
#[derive(Debug, Clone)]
pub struct UnitBuilder {
    options: BuildOptions,
}

impl UnitBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Absolute (normalized) source directory of the unit; the build runs here.
    pub fn source_dir(&self, unit: &BuildUnit) -> PathBuf {
        anchor(&self.options.project_root, unit.source_path())
    }

    /// `<out_root>/<name>`, relative to the unit's source directory.
    ///
    /// Purely lexical, so it only depends on the unit and the options.
    pub fn out_dir(&self, unit: &BuildUnit) -> PathBuf {
        let out = anchor(&self.options.project_root, &self.options.out_root).join(unit.name());
        relative_to(&self.source_dir(unit), &out)
    }

    /// `<tool> build <profile> --target <target> --out-dir <out> [extra...]`
    pub fn command(
        &self,
        toolchain: &ToolchainHandle,
        profile: BuildProfile,
        unit: &BuildUnit,
    ) -> CommandSpec {
        let out_dir = self.out_dir(unit);
        CommandSpec::new(toolchain.path())
            .arg("build")
            .arg(profile.flag())
            .arg("--target")
            .arg(self.options.target.as_str())
            .arg("--out-dir")
            .arg(out_dir.to_string_lossy())
            .args(self.options.extra_args.iter().cloned())
            .current_dir(self.source_dir(unit))
            .stdio(StdioMode::Inherit)
    }

    /// Build one unit. Any failure (nonzero exit or spawn error) is reported
    /// as `CompilationFailed` for that unit.
    pub async fn build(
        &self,
        runner: &dyn ProcessRunner,
        toolchain: &ToolchainHandle,
        profile: BuildProfile,
        unit: &BuildUnit,
    ) -> Result<()> {
        let cmd = self.command(toolchain, profile, unit);
        info!(unit = %unit.name(), %profile, "building crate");

        let result = supervise(runner, &cmd, |code| match code {
            Some(code) => format!("build exited with code {code}"),
            None => "build terminated by signal".to_string(),
        })
        .await;

        match result {
            Ok(()) => {
                info!(unit = %unit.name(), "crate built");
                Ok(())
            }
            Err(err) => {
                let reason = match err {
                    ProcessError::Exited(reason) => reason,
                    spawn @ ProcessError::Spawn { .. } => spawn.to_string(),
                };
                Err(CrateWatchError::CompilationFailed {
                    unit: unit.name().to_string(),
                    reason,
                })
            }
        }
    }
}
