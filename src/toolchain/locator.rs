// src/toolchain/locator.rs

use tracing::{debug, info};

use crate::errors::{CrateWatchError, Result};
use crate::exec::{supervise, CommandSpec, ProcessError, ProcessRunner, StdioMode};

use super::lookup::ExecutableLookup;
use super::{ToolchainHandle, ToolchainSpec};

/// Resolves the build executable, installing it through the package manager
/// when it is not on `PATH`.
pub struct ToolchainLocator<'a> {
    spec: &'a ToolchainSpec,
    lookup: &'a dyn ExecutableLookup,
    runner: &'a dyn ProcessRunner,
}

impl<'a> ToolchainLocator<'a> {
    pub fn new(
        spec: &'a ToolchainSpec,
        lookup: &'a dyn ExecutableLookup,
        runner: &'a dyn ProcessRunner,
    ) -> Self {
        Self {
            spec,
            lookup,
            runner,
        }
    }

    /// Return the path to the build tool.
    ///
    /// Fast path: the tool is already discoverable, nothing is run.
    /// Slow path: `<installer> install -g <tool>`, then look again.
    pub async fn locate(&self) -> Result<ToolchainHandle> {
        if let Some(path) = self.lookup.find(&self.spec.tool) {
            debug!(tool = %self.spec.tool, path = %path.display(), "toolchain found on PATH");
            return Ok(ToolchainHandle::new(path));
        }

        info!("installing {} ...", self.spec.tool);
        self.install().await?;
        info!("installed {}", self.spec.tool);

        self.lookup
            .find(&self.spec.tool)
            .map(ToolchainHandle::new)
            .ok_or_else(|| {
                CrateWatchError::ToolchainUnavailable(format!(
                    "'{}' still not found on PATH after installation",
                    self.spec.tool
                ))
            })
    }

    async fn install(&self) -> Result<()> {
        let installer = self.lookup.find(&self.spec.installer).ok_or_else(|| {
            CrateWatchError::ToolchainUnavailable(format!(
                "'{}' not found on PATH and '{}' is not available to install it",
                self.spec.tool, self.spec.installer
            ))
        })?;

        let cmd = CommandSpec::new(installer)
            .args(["install", "-g", self.spec.tool.as_str()])
            .stdio(StdioMode::Inherit);

        supervise(self.runner, &cmd, |code| CrateWatchError::InstallationFailed {
            tool: self.spec.tool.clone(),
            installer: self.spec.installer.clone(),
            code,
        })
        .await
        .map_err(|err| match err {
            ProcessError::Exited(e) => e,
            ProcessError::Spawn { program, source } => {
                CrateWatchError::SpawnFailed { program, source }
            }
        })
    }
}
