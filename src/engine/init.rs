// src/engine/init.rs

//! Session initialization: profile, toolchain, then one build per unit.

use tracing::{error, info};

use crate::build::UnitBuilder;
use crate::errors::{CrateWatchError, Result};
use crate::exec::ProcessRunner;
use crate::toolchain::ToolchainLocator;
use crate::types::{BuildProfile, RunMode};
use crate::unit::{BuildUnit, UnitName};

use super::session::Session;

/// Result of one initial build.
#[derive(Debug)]
pub struct UnitBuildResult {
    pub unit: UnitName,
    pub result: Result<()>,
}

/// Outcome of the startup builds, one entry per unit in declaration order.
#[derive(Debug, Default)]
pub struct InitReport {
    results: Vec<UnitBuildResult>,
}

impl InitReport {
    pub fn results(&self) -> &[UnitBuildResult] {
        &self.results
    }

    /// Units that were attempted, in order.
    pub fn attempted(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.unit.as_str()).collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &CrateWatchError)> {
        self.results
            .iter()
            .filter_map(|r| r.result.as_ref().err().map(|e| (r.unit.as_str(), e)))
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failure_count() == 0
    }
}

/// Resolve the session and run the initial builds.
///
/// Toolchain errors abort initialization. Build failures are logged and
/// recorded in the report; they never stop later units from being built.
pub async fn initialize(
    mode: RunMode,
    units: Vec<BuildUnit>,
    builder: UnitBuilder,
    locator: &ToolchainLocator<'_>,
    runner: &dyn ProcessRunner,
) -> Result<(Session, InitReport)> {
    let profile = BuildProfile::for_mode(mode);
    info!(?mode, %profile, units = units.len(), "initializing build session");

    let toolchain = locator.locate().await?;
    let session = Session::new(profile, toolchain, units, builder);

    let report = initial_builds(&session, runner).await;
    Ok((session, report))
}

/// Build every unit once, in declaration order, folding each outcome into
/// the report.
pub async fn initial_builds(session: &Session, runner: &dyn ProcessRunner) -> InitReport {
    let mut report = InitReport::default();

    for unit in session.units() {
        let result = session.build_unit(runner, unit).await;
        if let Err(err) = &result {
            error!(unit = %unit.name(), error = %err, "initial build failed");
        }
        report.results.push(UnitBuildResult {
            unit: unit.name().to_string(),
            result,
        });
    }

    info!(
        attempted = report.results.len(),
        failed = report.failure_count(),
        "initial builds finished"
    );
    report
}
