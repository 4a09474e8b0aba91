// tests/process_supervisor.rs

mod common;
use crate::common::{init_tracing, with_timeout};

use cratewatch::exec::{supervise, CommandSpec, ProcessError, RealProcessRunner, StdioMode};
use cratewatch_test_utils::fake_runner::{FakeExit, FakeProcessRunner};

fn exited_code<E: std::fmt::Debug>(r: Result<(), ProcessError<E>>) -> E {
    match r {
        Err(ProcessError::Exited(e)) => e,
        other => panic!("Expected Exited, got: {:?}", other),
    }
}

#[tokio::test]
async fn zero_exit_is_success() {
    init_tracing();
    let runner = FakeProcessRunner::new();
    let spec = CommandSpec::new("/bin/tool").arg("x");

    let result = with_timeout(supervise(&runner, &spec, |code| code)).await;
    assert!(result.is_ok());
    assert_eq!(runner.calls(), vec![spec]);
}

#[tokio::test]
async fn nonzero_exit_carries_the_code() {
    let runner = FakeProcessRunner::new().exit_for_program("tool", FakeExit::Code(3));
    let spec = CommandSpec::new("/bin/tool");

    let code = exited_code(with_timeout(supervise(&runner, &spec, |code| code)).await);
    assert_eq!(code, Some(3));
}

#[tokio::test]
async fn signal_termination_is_reported_without_a_code() {
    let runner = FakeProcessRunner::new().exit_for_program("tool", FakeExit::Signal);
    let spec = CommandSpec::new("/bin/tool");

    let code = exited_code(with_timeout(supervise(&runner, &spec, |code| code)).await);
    assert_eq!(code, None);
}

#[tokio::test]
async fn spawn_failure_is_kept_apart_from_exit_failures() {
    let runner = FakeProcessRunner::new().exit_for_program("tool", FakeExit::SpawnError);
    let spec = CommandSpec::new("/bin/tool");

    match with_timeout(supervise(&runner, &spec, |code| code)).await {
        Err(ProcessError::Spawn { program, .. }) => assert_eq!(program, "/bin/tool"),
        other => panic!("Expected Spawn, got: {:?}", other),
    }
}

#[tokio::test]
async fn each_call_runs_exactly_once() {
    let runner = FakeProcessRunner::new().exit_for_program("tool", FakeExit::Code(1));
    let spec = CommandSpec::new("/bin/tool");

    let _ = with_timeout(supervise(&runner, &spec, |code| code)).await;
    assert_eq!(runner.calls_to("tool").len(), 1);
}

#[cfg(unix)]
#[tokio::test]
async fn real_runner_reports_exit_status() {
    init_tracing();
    let runner = RealProcessRunner::new();

    let ok = CommandSpec::new("sh")
        .args(["-c", "exit 0"])
        .stdio(StdioMode::Null);
    assert!(with_timeout(supervise(&runner, &ok, |code| code)).await.is_ok());

    let failing = CommandSpec::new("sh")
        .args(["-c", "exit 7"])
        .stdio(StdioMode::Null);
    let code = exited_code(with_timeout(supervise(&runner, &failing, |code| code)).await);
    assert_eq!(code, Some(7));
}

#[cfg(unix)]
#[tokio::test]
async fn real_runner_respects_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker"), "x").unwrap();
    let runner = RealProcessRunner::new();

    let spec = CommandSpec::new("sh")
        .args(["-c", "test -f marker"])
        .current_dir(dir.path())
        .stdio(StdioMode::Null);
    assert!(with_timeout(supervise(&runner, &spec, |code| code)).await.is_ok());
}

#[tokio::test]
async fn real_runner_missing_binary_is_a_spawn_failure() {
    let runner = RealProcessRunner::new();
    let spec = CommandSpec::new("/definitely/not/a/real/binary-cratewatch")
        .stdio(StdioMode::Null);

    assert!(matches!(
        with_timeout(supervise(&runner, &spec, |code| code)).await,
        Err(ProcessError::Spawn { .. })
    ));
}
