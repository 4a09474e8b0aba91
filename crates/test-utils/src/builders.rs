#![allow(dead_code)]

use cratewatch::config::{
    BuildSection, ConfigFile, CrateConfig, RawConfigFile, ToolchainSection,
};
use cratewatch::unit::BuildUnit;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                toolchain: ToolchainSection::default(),
                build: BuildSection::default(),
                crates: Vec::new(),
            },
        }
    }

    pub fn with_crate(mut self, krate: CrateConfig) -> Self {
        self.config.crates.push(krate);
        self
    }

    pub fn with_tool(mut self, tool: &str) -> Self {
        self.config.toolchain.tool = tool.to_string();
        self
    }

    pub fn with_installer(mut self, installer: &str) -> Self {
        self.config.toolchain.installer = installer.to_string();
        self
    }

    pub fn with_out_root(mut self, out_root: &str) -> Self {
        self.config.build.out_root = out_root.to_string();
        self
    }

    pub fn with_target(mut self, target: &str) -> Self {
        self.config.build.target = target.to_string();
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `CrateConfig`.
pub struct CrateConfigBuilder {
    krate: CrateConfig,
}

impl CrateConfigBuilder {
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            krate: CrateConfig {
                name: name.to_string(),
                path: path.to_string(),
                watch: None,
            },
        }
    }

    pub fn watch(mut self, pattern: &str) -> Self {
        let watches = self.krate.watch.get_or_insert(vec![]);
        watches.push(pattern.to_string());
        self
    }

    pub fn build(self) -> CrateConfig {
        self.krate
    }
}

/// Shorthand for a unit with default watch patterns.
pub fn unit(name: &str, path: &str) -> BuildUnit {
    BuildUnit::new(name, path, None)
}
