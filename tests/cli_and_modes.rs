// tests/cli_and_modes.rs

mod common;
use crate::common::{init_tracing, with_timeout};

use std::str::FromStr;

use clap::Parser;

use cratewatch::cli::{CliArgs, LogLevel};
use cratewatch::logging::build_filter;
use cratewatch::types::{BuildProfile, RunMode};
use cratewatch::{run, RunOutcome};

#[test]
fn cli_defaults() {
    let args = CliArgs::try_parse_from(["cratewatch"]).unwrap();

    assert_eq!(args.config, "Cratewatch.toml");
    assert_eq!(args.mode, RunMode::Serve);
    assert!(args.log_level.is_none());
    assert!(!args.dry_run);
}

#[test]
fn cli_accepts_build_mode_and_flags() {
    let args = CliArgs::try_parse_from([
        "cratewatch",
        "--config",
        "web/Cratewatch.toml",
        "--mode",
        "build",
        "--log-level",
        "debug",
        "--dry-run",
    ])
    .unwrap();

    assert_eq!(args.config, "web/Cratewatch.toml");
    assert_eq!(args.mode, RunMode::Build);
    assert!(args.log_level.is_some());
    assert!(args.dry_run);
}

#[test]
fn cli_rejects_unknown_mode() {
    assert!(CliArgs::try_parse_from(["cratewatch", "--mode", "watch"]).is_err());
}

#[test]
fn profile_follows_mode() {
    assert_eq!(BuildProfile::for_mode(RunMode::Serve), BuildProfile::Development);
    assert_eq!(BuildProfile::for_mode(RunMode::Build), BuildProfile::Release);
    assert_eq!(BuildProfile::Development.flag(), "--dev");
    assert_eq!(BuildProfile::Release.to_string(), "--release");
    assert_eq!(RunMode::from_str(" Build ").unwrap(), RunMode::Build);
    assert!(RunMode::from_str("preview").is_err());
}

fn filter_string(cli: Option<LogLevel>, env: Option<&str>) -> String {
    build_filter(cli, env).to_string().to_lowercase()
}

#[test]
fn cli_level_wins_over_environment() {
    assert_eq!(filter_string(Some(LogLevel::Debug), Some("trace")), "debug");
    assert_eq!(filter_string(Some(LogLevel::Error), None), "error");
}

#[test]
fn environment_accepts_filter_directives() {
    assert_eq!(filter_string(None, Some("warn")), "warn");

    let directives = filter_string(None, Some("cratewatch=debug,notify=warn"));
    assert!(directives.contains("cratewatch=debug"), "{directives}");
    assert!(directives.contains("notify=warn"), "{directives}");
}

#[test]
fn missing_or_blank_environment_defaults_to_info() {
    assert_eq!(filter_string(None, None), "info");
    assert_eq!(filter_string(None, Some("   ")), "info");
}

#[tokio::test]
async fn dry_run_validates_without_running_anything() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("Cratewatch.toml");
    std::fs::write(
        &config,
        "[toolchain]\ntool = \"definitely-not-installed-tool\"\ninstaller = \"definitely-not-installed-npm\"\n\n[[crate]]\nname = \"a\"\npath = \"a\"\n",
    )
    .unwrap();

    let args = CliArgs::try_parse_from([
        "cratewatch",
        "--config",
        config.to_str().unwrap(),
        "--dry-run",
    ])
    .unwrap();

    let outcome = with_timeout(run(args)).await.unwrap();
    assert_eq!(outcome, RunOutcome::Completed);
}

#[tokio::test]
async fn invalid_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("Cratewatch.toml");
    std::fs::write(&config, "[build]\ntarget = \"web\"\n").unwrap();

    let args =
        CliArgs::try_parse_from(["cratewatch", "--config", config.to_str().unwrap()]).unwrap();

    let err = with_timeout(run(args)).await.unwrap_err();
    assert!(err.to_string().contains("at least one"), "{err}");
}
