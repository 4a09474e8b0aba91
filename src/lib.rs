// src/lib.rs

pub mod build;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod host;
pub mod logging;
pub mod path_utils;
pub mod toolchain;
pub mod types;
pub mod unit;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::engine::{EngineEvent, InitReport, Runtime, SessionBuildBackend};
use crate::exec::{ProcessRunner, RealProcessRunner};
use crate::host::{CratePlugin, StdoutReloadSink};
use crate::toolchain::PathLookup;
use crate::types::RunMode;
use crate::watch::FsWatcher;

/// How a CLI run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing failed (or the watch session was shut down).
    Completed,
    /// `build` mode finished but this many crates failed to compile.
    BuildFailures(usize),
}

/// High-level entry point used by `main.rs`.
///
/// The binary plays the part of the host. This wires together:
/// - config loading
/// - the plugin hooks, in host order
/// - (in `serve` mode) the file watcher, runtime and Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<RunOutcome> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;
    let root_dir = config_root_dir(&config_path);

    let mut plugin = CratePlugin::from_config(&cfg, root_dir);

    if args.dry_run {
        print_dry_run(&plugin, args.mode)?;
        return Ok(RunOutcome::Completed);
    }

    let patch = plugin.config();
    info!(patch = %patch.to_json()?, "host config patch");

    let lookup = PathLookup::from_env();
    let runner: Arc<dyn ProcessRunner> = Arc::new(RealProcessRunner::new());

    let report = plugin
        .config_resolved(args.mode, &lookup, runner.as_ref())
        .await?;

    if args.mode == RunMode::Build {
        return Ok(build_outcome(&report));
    }

    serve(plugin, runner).await?;
    Ok(RunOutcome::Completed)
}

/// Watch loop for `serve` mode. Returns after Ctrl-C.
async fn serve(plugin: CratePlugin, runner: Arc<dyn ProcessRunner>) -> Result<()> {
    let session = plugin
        .session()
        .ok_or_else(|| anyhow::anyhow!("session not ready after config_resolved"))?;
    let core = plugin.engine()?;

    // Engine event channel.
    let (engine_tx, engine_rx) = mpsc::channel::<EngineEvent>(64);

    // Raw change events from the filesystem watcher.
    let (change_tx, mut change_rx) = mpsc::unbounded_channel::<PathBuf>();
    let mut watcher = FsWatcher::new(change_tx)?;
    plugin.configure_server(&mut watcher)?;
    debug!(roots = ?watcher.roots(), "watch roots registered");

    // Ctrl-C → graceful shutdown.
    {
        let tx = engine_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(EngineEvent::ShutdownRequested).await;
        });
    }

    // Host side: every raw change goes through the hot-update hook.
    {
        let tx = engine_tx.clone();
        tokio::spawn(async move {
            while let Some(path) = change_rx.recv().await {
                if let Err(err) = plugin.handle_hot_update(&path, &tx).await {
                    warn!(error = %err, "dropping file change; engine is gone");
                    break;
                }
            }
        });
    }

    let backend = SessionBuildBackend::new(session, runner, engine_tx);
    let runtime = Runtime::new(core, engine_rx, backend, StdoutReloadSink::new());
    runtime.run().await?;

    drop(watcher);
    Ok(())
}

fn build_outcome(report: &InitReport) -> RunOutcome {
    match report.failure_count() {
        0 => RunOutcome::Completed,
        n => RunOutcome::BuildFailures(n),
    }
}

/// Figure out the project root that crate paths are relative to.
///
/// - If the config path has a non-empty parent (e.g. "web/Cratewatch.toml"),
///   we use that directory.
/// - If it's just a bare filename like "Cratewatch.toml" (parent = ""),
///   we fall back to the current working directory "."
///
/// The result is canonicalized when possible so it lines up with the
/// absolute paths the watcher reports.
fn config_root_dir(config_path: &Path) -> PathBuf {
    let dir = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    dir.canonicalize().unwrap_or(dir)
}

/// Simple dry-run output: crates, commands and the host config patch.
fn print_dry_run(plugin: &CratePlugin, mode: RunMode) -> Result<()> {
    let profile = types::BuildProfile::for_mode(mode);
    let builder = build::UnitBuilder::new(plugin.build_options().clone());

    println!("cratewatch dry-run");
    println!("  mode = {mode:?} (profile {profile})");
    println!();

    println!("crates ({}):", plugin.units().len());
    for unit in plugin.units() {
        println!("  - {}", unit.name());
        println!("      path: {}", builder.source_dir(unit).display());
        println!("      out-dir: {}", builder.out_dir(unit).display());
        println!("      watch: {:?}", unit.watch_patterns());
    }
    println!();

    println!("watch roots:");
    for root in plugin.watch_roots() {
        println!("  - {}", root.display());
    }
    println!();

    println!("config patch: {}", plugin.config().to_json()?);

    debug!("dry-run complete (no execution)");
    Ok(())
}
