// src/config/validate.rs

use std::collections::HashSet;

use globset::Glob;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{CrateWatchError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::CrateWatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.toolchain, raw.build, raw.crates))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_crates(cfg)?;
    validate_sections(cfg)?;
    validate_crates(cfg)?;
    Ok(())
}

fn ensure_has_crates(cfg: &RawConfigFile) -> Result<()> {
    if cfg.crates.is_empty() {
        return Err(config_error(
            "config must contain at least one [[crate]] entry",
        ));
    }
    Ok(())
}

fn validate_sections(cfg: &RawConfigFile) -> Result<()> {
    let required = [
        ("[toolchain].tool", &cfg.toolchain.tool),
        ("[toolchain].installer", &cfg.toolchain.installer),
        ("[build].out_root", &cfg.build.out_root),
        ("[build].target", &cfg.build.target),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(config_error(format!("{field} must not be empty")));
        }
    }

    Ok(())
}

fn validate_crates(cfg: &RawConfigFile) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();

    for (idx, krate) in cfg.crates.iter().enumerate() {
        if krate.name.trim().is_empty() {
            return Err(config_error(format!(
                "crate #{} has an empty `name`",
                idx + 1
            )));
        }
        if !seen.insert(krate.name.as_str()) {
            return Err(config_error(format!(
                "duplicate crate name '{}'",
                krate.name
            )));
        }
        if krate.path.trim().is_empty() {
            return Err(config_error(format!(
                "crate '{}' has an empty `path`",
                krate.name
            )));
        }

        for pattern in krate.watch.iter().flatten() {
            Glob::new(pattern).map_err(|e| {
                config_error(format!(
                    "crate '{}' has an invalid watch pattern '{}': {}",
                    krate.name, pattern, e
                ))
            })?;
        }
    }

    Ok(())
}

fn config_error(msg: impl Into<String>) -> CrateWatchError {
    CrateWatchError::ConfigError(msg.into())
}
