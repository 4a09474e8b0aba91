use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

/// How the host is running: a dev server (`serve`) or a one-shot production
/// build (`build`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    Serve,
    Build,
}

impl Default for RunMode {
    fn default() -> Self {
        RunMode::Serve
    }
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "serve" => Ok(RunMode::Serve),
            "build" => Ok(RunMode::Build),
            other => Err(format!(
                "invalid run mode: {other} (expected \"serve\" or \"build\")"
            )),
        }
    }
}

/// Optimisation mode passed to the build tool.
///
/// Chosen once per session from the [`RunMode`]; never recomputed per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildProfile {
    Release,
    Development,
}

impl BuildProfile {
    /// `serve` builds with `--dev`, everything else with `--release`.
    pub fn for_mode(mode: RunMode) -> Self {
        match mode {
            RunMode::Serve => BuildProfile::Development,
            RunMode::Build => BuildProfile::Release,
        }
    }

    /// Command-line flag understood by `wasm-pack build`.
    pub fn flag(self) -> &'static str {
        match self {
            BuildProfile::Release => "--release",
            BuildProfile::Development => "--dev",
        }
    }
}

impl fmt::Display for BuildProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}
