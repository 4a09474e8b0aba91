// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::RunMode;

/// Command-line arguments for `cratewatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cratewatch",
    version,
    about = "Keep Rust crates compiled with wasm-pack and signal reloads on change.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Cratewatch.toml` in the current working directory. Crate
    /// paths in the file are relative to its directory.
    #[arg(long, value_name = "PATH", default_value = "Cratewatch.toml")]
    pub config: String,

    /// Host run mode: `serve` builds with `--dev` and keeps watching,
    /// `build` builds once with `--release` and exits.
    #[arg(long, value_enum, value_name = "MODE", default_value = "serve")]
    pub mode: RunMode,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CRATEWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print crates and the host config patch, but don't
    /// run anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
