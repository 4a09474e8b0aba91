// src/engine/session.rs

use std::sync::Arc;

use crate::build::UnitBuilder;
use crate::errors::Result;
use crate::exec::ProcessRunner;
use crate::toolchain::ToolchainHandle;
use crate::types::BuildProfile;
use crate::unit::BuildUnit;

/// Everything that is resolved once during initialization and read-only
/// afterwards: the profile, the toolchain path and the units.
///
/// Passed explicitly (usually behind an `Arc`) to every later build.
#[derive(Debug, Clone)]
pub struct Session {
    profile: BuildProfile,
    toolchain: ToolchainHandle,
    units: Arc<[BuildUnit]>,
    builder: UnitBuilder,
}

impl Session {
    pub fn new(
        profile: BuildProfile,
        toolchain: ToolchainHandle,
        units: impl Into<Arc<[BuildUnit]>>,
        builder: UnitBuilder,
    ) -> Self {
        Self {
            profile,
            toolchain,
            units: units.into(),
            builder,
        }
    }

    pub fn profile(&self) -> BuildProfile {
        self.profile
    }

    pub fn toolchain(&self) -> &ToolchainHandle {
        &self.toolchain
    }

    /// Units in declaration order.
    pub fn units(&self) -> &[BuildUnit] {
        &self.units
    }

    pub fn unit(&self, name: &str) -> Option<&BuildUnit> {
        self.units.iter().find(|u| u.name() == name)
    }

    pub fn builder(&self) -> &UnitBuilder {
        &self.builder
    }

    /// Build `unit` with the session's toolchain and profile.
    pub async fn build_unit(&self, runner: &dyn ProcessRunner, unit: &BuildUnit) -> Result<()> {
        self.builder
            .build(runner, &self.toolchain, self.profile, unit)
            .await
    }
}
