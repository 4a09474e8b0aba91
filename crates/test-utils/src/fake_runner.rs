use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use cratewatch::exec::{CommandSpec, ExitReport, ProcessRunner, RunFuture};

/// How a fake process ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeExit {
    Code(i32),
    Signal,
    SpawnError,
}

type Hook = Arc<dyn Fn(&CommandSpec) + Send + Sync>;

/// A process runner that:
/// - records every `CommandSpec` it is asked to run
/// - returns scripted outcomes keyed by working directory or program name
///   (default: exit code 0)
/// - optionally runs a hook per invocation (e.g. to simulate installation)
#[derive(Clone, Default)]
pub struct FakeProcessRunner {
    calls: Arc<Mutex<Vec<CommandSpec>>>,
    by_cwd: Arc<Mutex<HashMap<PathBuf, FakeExit>>>,
    by_program: Arc<Mutex<HashMap<String, FakeExit>>>,
    hook: Option<Hook>,
}

impl FakeProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands whose working directory is `cwd` end with `exit`.
    pub fn exit_for_cwd(self, cwd: impl Into<PathBuf>, exit: FakeExit) -> Self {
        self.by_cwd.lock().unwrap().insert(cwd.into(), exit);
        self
    }

    /// Commands whose program file name is `program` end with `exit`.
    pub fn exit_for_program(self, program: &str, exit: FakeExit) -> Self {
        self.by_program
            .lock()
            .unwrap()
            .insert(program.to_string(), exit);
        self
    }

    pub fn on_run<F>(mut self, hook: F) -> Self
    where
        F: Fn(&CommandSpec) + Send + Sync + 'static,
    {
        self.hook = Some(Arc::new(hook));
        self
    }

    /// Everything run so far, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls whose program file name is `program`.
    pub fn calls_to(&self, program: &str) -> Vec<CommandSpec> {
        self.calls()
            .into_iter()
            .filter(|c| file_name(&c.program) == program)
            .collect()
    }

    fn exit_for(&self, spec: &CommandSpec) -> FakeExit {
        if let Some(exit) = self.by_program.lock().unwrap().get(&file_name(&spec.program)) {
            return *exit;
        }
        if let Some(cwd) = &spec.cwd {
            if let Some(exit) = self.by_cwd.lock().unwrap().get(cwd) {
                return *exit;
            }
        }
        FakeExit::Code(0)
    }
}

impl ProcessRunner for FakeProcessRunner {
    fn run<'a>(&'a self, spec: &'a CommandSpec) -> RunFuture<'a> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(spec.clone());
            if let Some(hook) = &self.hook {
                hook(spec);
            }

            match self.exit_for(spec) {
                FakeExit::Code(code) => Ok(ExitReport::from_code(code)),
                FakeExit::Signal => Ok(ExitReport { code: None }),
                FakeExit::SpawnError => Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{}: not found", spec.program.display()),
                )),
            }
        })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
