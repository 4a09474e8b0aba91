// src/main.rs

use cratewatch::{cli, logging, run, RunOutcome};

#[tokio::main]
async fn main() {
    match run_main().await {
        Ok(RunOutcome::Completed) => {}
        Ok(RunOutcome::BuildFailures(n)) => {
            eprintln!("cratewatch: {n} crate(s) failed to build");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("cratewatch error: {err:?}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> anyhow::Result<RunOutcome> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
